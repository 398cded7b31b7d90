use crate::{
    archiver::{common_parent, reject_traversal, Archiver},
    fs_util::*,
    prelude::*,
};
use std::{
    path::{Path, PathBuf},
    process::Command,
};

/// Wraps the system `tar` binary: `tar czf` to bundle, `tar tzf` to list
/// members, `tar xzf` to unbundle. Grounded directly on the original
/// `penpal.archive.Archiver`, which shells out to the same tool the same
/// way.
#[derive(Clone, Copy, Debug, Default)]
pub struct TarArchiver;

impl Archiver for TarArchiver {
    fn preflight(&self) -> PenpalResult<()> {
        match Command::new("tar").arg("--help").output() {
            Ok(output) if output.status.success() => Ok(()),
            Ok(_) => penpal_err!(MissingDependency, "tar exited with a non-zero status".to_string()),
            Err(_) => penpal_err!(MissingDependency, "unable to locate the tar utility".to_string()),
        }
    }

    fn create_archive(&self, sources: &[PathBuf], dest: &Path) -> PenpalResult<()> {
        let parent = common_parent(sources)?;

        let mut cmd = Command::new("tar");
        cmd.arg("-czf").arg(dest).arg("-C").arg(parent);
        for src in sources {
            let basename = src
                .file_name()
                .ok_or_else(|| Other(format!("source {:?} has no basename", src)))?;
            cmd.arg(basename);
        }

        let status = cmd.status()?;
        if !status.success() {
            return penpal_err!(Other, format!("tar failed to create archive at {:?}", dest));
        }
        chmod(dest, 0o700)?;
        Ok(())
    }

    fn list_members(&self, archive: &Path) -> PenpalResult<Vec<String>> {
        let output = Command::new("tar").arg("-tzf").arg(archive).output()?;
        if !output.status.success() {
            return penpal_err!(MalformedCiphertext, format!("tar could not list {:?}", archive));
        }
        let listing = String::from_utf8(output.stdout).map_err(|err| Other(format!("{}", err)))?;
        Ok(listing.lines().map(str::trim_end_matches('/')).filter(|l| !l.is_empty()).map(String::from).collect())
    }

    fn extract_archive(&self, archive: &Path, dest_dir: &Path) -> PenpalResult<()> {
        for member in self.list_members(archive)? {
            reject_traversal(&member)?;
        }

        let status = Command::new("tar").arg("-xzf").arg(archive).arg("-C").arg(dest_dir).status()?;
        if !status.success() {
            return penpal_err!(MalformedCiphertext, format!("tar failed to extract {:?}", archive));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::read;

    fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn preflight_succeeds_when_tar_is_on_path() {
        TarArchiver.preflight().unwrap();
    }

    #[test]
    fn round_trips_file_content_and_sets_dest_mode() {
        let src_dir = tmpdir!().unwrap();
        let a = write(src_dir.path(), "a.txt", b"hello");
        let b = write(src_dir.path(), "b.txt", b"world");

        let out_dir = tmpdir!().unwrap();
        let archive = out_dir.path().join("bundle.tgz");
        TarArchiver.create_archive(&[a, b], &archive).unwrap();
        assert_eq!(mode_bits(&archive).unwrap(), 0o700);

        let extract_dir = tmpdir!().unwrap();
        TarArchiver.extract_archive(&archive, extract_dir.path()).unwrap();
        assert_eq!(read(extract_dir.path().join("a.txt")).unwrap(), b"hello");
        assert_eq!(read(extract_dir.path().join("b.txt")).unwrap(), b"world");
    }

    #[test]
    fn list_members_matches_what_was_archived() {
        let src_dir = tmpdir!().unwrap();
        let a = write(src_dir.path(), "manifest", b"- one\n");
        let b = write(src_dir.path(), "cipher.bin", b"\x01\x02\x03");

        let out_dir = tmpdir!().unwrap();
        let archive = out_dir.path().join("bundle.tgz");
        TarArchiver.create_archive(&[a, b], &archive).unwrap();

        let mut members = TarArchiver.list_members(&archive).unwrap();
        members.sort();
        assert_eq!(members, vec!["cipher.bin".to_string(), "manifest".to_string()]);
    }

    #[test]
    fn create_archive_rejects_sources_without_a_shared_parent() {
        let dir_a = tmpdir!().unwrap();
        let dir_b = tmpdir!().unwrap();
        let a = write(dir_a.path(), "a.txt", b"hello");
        let b = write(dir_b.path(), "b.txt", b"world");

        let out_dir = tmpdir!().unwrap();
        let archive = out_dir.path().join("bundle.tgz");
        assert!(TarArchiver.create_archive(&[a, b], &archive).is_err());
    }
}
