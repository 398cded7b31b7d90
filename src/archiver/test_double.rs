use crate::{
    archiver::{common_parent, reject_traversal, Archiver},
    fs_util::*,
    prelude::*,
};
use std::{
    convert::TryInto,
    fs::{read, write},
    io::{Read, Write},
    path::{Path, PathBuf},
};

/// A disk-backed stand-in for [`super::TarArchiver`] that never shells out
/// to `tar`. Bundles members as `(u32 name_len, name, u32 content_len,
/// content)` tuples back to back, so tests that exercise `Encrypter`/
/// `Decrypter` orchestration can run wherever `cargo test` runs, without the
/// `tar` binary installed.
#[derive(Clone, Copy, Debug, Default)]
pub struct FakeArchiver;

fn write_u32<W: Write>(w: &mut W, n: u32) -> PenpalResult<()> {
    Ok(w.write_all(&n.to_be_bytes())?)
}

fn read_u32<R: Read>(r: &mut R) -> PenpalResult<Option<u32>> {
    let mut buf = [0u8; 4];
    match r.read(&mut buf)? {
        0 => Ok(None),
        4 => Ok(Some(u32::from_be_bytes(buf))),
        n => {
            // short read on the length prefix itself
            r.read_exact(&mut buf[n..])?;
            Ok(Some(u32::from_be_bytes(buf)))
        }
    }
}

impl Archiver for FakeArchiver {
    fn preflight(&self) -> PenpalResult<()> {
        Ok(())
    }

    fn create_archive(&self, sources: &[PathBuf], dest: &Path) -> PenpalResult<()> {
        common_parent(sources)?;

        let mut out = fopen_w(dest)?;
        for src in sources {
            let basename = src
                .file_name()
                .ok_or_else(|| Other(format!("source {:?} has no basename", src)))?
                .to_str()
                .ok_or_else(|| Other(format!("source {:?} is not valid utf8", src)))?;
            let content = read(src)?;

            write_u32(&mut out, basename.len().try_into().unwrap())?;
            out.write_all(basename.as_bytes())?;
            write_u32(&mut out, content.len().try_into().unwrap())?;
            out.write_all(&content)?;
        }
        chmod(dest, 0o700)?;
        Ok(())
    }

    fn list_members(&self, archive: &Path) -> PenpalResult<Vec<String>> {
        Ok(self.read_members(archive)?.into_iter().map(|(name, _)| name).collect())
    }

    fn extract_archive(&self, archive: &Path, dest_dir: &Path) -> PenpalResult<()> {
        for (name, content) in self.read_members(archive)? {
            reject_traversal(&name)?;
            write(dest_dir.join(&name), content)?;
        }
        Ok(())
    }
}

impl FakeArchiver {
    fn read_members(&self, archive: &Path) -> PenpalResult<Vec<(String, Vec<u8>)>> {
        let mut input = fopen_r(archive)?;
        let mut members = Vec::new();
        loop {
            let name_len = match read_u32(&mut input)? {
                Some(n) => n as usize,
                None => break,
            };
            let mut name_buf = vec![0u8; name_len];
            input.read_exact(&mut name_buf)?;
            let name = String::from_utf8(name_buf).map_err(|err| Other(format!("{}", err)))?;

            let content_len = read_u32(&mut input)?.ok_or_else(|| MalformedCiphertext(format!("{:?}", archive)))? as usize;
            let mut content = vec![0u8; content_len];
            input.read_exact(&mut content)?;

            members.push((name, content));
        }
        Ok(members)
    }
}
