/// THIS MOD SHOULD NOT USE THINGS FROM OTHER MODS IN THIS CRATE.
use std::{
    env,
    fs::{self, read_dir, File, OpenOptions, Permissions},
    io::{self, Read},
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};
use tempfile::{self, NamedTempFile, TempDir};

macro_rules! tmpfile {
    () => {
        crate::fs_util::mktemp_file(None, "", "")
    };
    ( $out_dir:expr ) => {
        crate::fs_util::mktemp_file(Some($out_dir), "", "")
    };
}

macro_rules! tmpdir {
    () => {
        crate::fs_util::mktemp_dir(None, "", "")
    };
    ( $out_dir:expr ) => {
        crate::fs_util::mktemp_dir(Some($out_dir), "", "")
    };
}

#[inline]
pub fn mktemp_file(out_dir: Option<&Path>, prefix: &str, suffix: &str) -> io::Result<NamedTempFile> {
    tempfile::Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempfile_in(out_dir.unwrap_or(env::temp_dir().as_path()))
}

#[inline]
pub fn mktemp_dir(out_dir: Option<&Path>, prefix: &str, suffix: &str) -> io::Result<TempDir> {
    tempfile::Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempdir_in(out_dir.unwrap_or(env::temp_dir().as_path()))
}

#[inline]
pub fn ls<P>(root: P) -> io::Result<impl Iterator<Item = io::Result<PathBuf>>>
where
    P: AsRef<Path>,
{
    match read_dir(root) {
        Ok(iter) => Ok(iter.map(|entry_res| entry_res.map(|entry| entry.path()))),
        Err(err) => Err(err),
    }
}

/// Open `path` for writing, creating it if absent, with mode 0600.
pub fn fopen_w<P>(path: P) -> io::Result<File>
where
    P: AsRef<Path>,
{
    let file = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
    file.set_permissions(Permissions::from_mode(0o600))?;
    Ok(file)
}

#[inline]
pub fn fopen_r<P>(path: P) -> io::Result<File>
where
    P: AsRef<Path>,
{
    OpenOptions::new().read(true).open(path)
}

/// The octal permission mode bits of `path` (the low 9 bits of `st_mode`).
#[inline]
pub fn mode_bits<P>(path: P) -> io::Result<u32>
where
    P: AsRef<Path>,
{
    Ok(fs::metadata(path)?.permissions().mode() & 0o777)
}

#[inline]
pub fn chmod<P>(path: P, mode: u32) -> io::Result<()>
where
    P: AsRef<Path>,
{
    fs::set_permissions(path, Permissions::from_mode(mode))
}

/// Read from `reader` until `buf` is full or the underlying reader reaches
/// EOF, retrying short reads in between. Returns the number of bytes
/// actually filled, which is less than `buf.len()` only at EOF.
pub fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..])? {
            0 => break,
            n => total += n,
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_up_to_fills_the_buffer_when_enough_data_is_available() {
        let mut src: &[u8] = b"0123456789";
        let mut buf = [0u8; 6];
        assert_eq!(read_up_to(&mut src, &mut buf).unwrap(), 6);
        assert_eq!(&buf, b"012345");
    }

    #[test]
    fn read_up_to_returns_a_short_count_at_eof() {
        let mut src: &[u8] = b"abc";
        let mut buf = [0u8; 6];
        assert_eq!(read_up_to(&mut src, &mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], b"abc");
    }

    #[test]
    fn fopen_w_sets_owner_only_mode() {
        let dir = tmpdir!().unwrap();
        let path = dir.path().join("f");
        fopen_w(&path).unwrap();
        assert_eq!(mode_bits(&path).unwrap(), 0o600);
    }

    #[test]
    fn chmod_round_trips() {
        let dir = tmpdir!().unwrap();
        let path = dir.path().join("f");
        fopen_w(&path).unwrap();
        chmod(&path, 0o400).unwrap();
        assert_eq!(mode_bits(&path).unwrap(), 0o400);
    }

    #[test]
    fn ls_lists_direct_children_only() {
        let dir = tmpdir!().unwrap();
        fopen_w(dir.path().join("a")).unwrap();
        fopen_w(dir.path().join("b")).unwrap();
        let names: Vec<_> = ls(dir.path())
            .unwrap()
            .map(Result::unwrap)
            .map(|p| p.file_name().unwrap().to_owned())
            .collect();
        assert_eq!(names.len(), 2);
    }
}
