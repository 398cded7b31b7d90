mod tar_archiver;
mod test_double;

pub use tar_archiver::TarArchiver;
#[cfg(test)]
pub use test_double::FakeArchiver;

use crate::prelude::*;
use std::path::{Path, PathBuf};

/// Bundles/unbundles a set of files into a single compressed archive.
///
/// This is the crate's one trait-object seam (per the "external tool
/// dependency" design note): `Encrypter`/`Decrypter` take `&dyn Archiver`
/// so tests can substitute [`FakeArchiver`] for the real subprocess-backed
/// [`TarArchiver`] without touching `tar` or depending on it being
/// installed.
pub trait Archiver {
    /// Verify the archive tool is invokable at all.
    fn preflight(&self) -> PenpalResult<()>;

    /// Bundle `sources` (which must share a common parent directory) into a
    /// single compressed archive at `dest`, named by each source's basename.
    /// `dest`'s mode is set to 0700 on success.
    fn create_archive(&self, sources: &[PathBuf], dest: &Path) -> PenpalResult<()>;

    /// List the basenames of every member in `archive`, without extracting.
    fn list_members(&self, archive: &Path) -> PenpalResult<Vec<String>>;

    /// Extract every member of `archive` into `dest_dir`. Fails with
    /// `PathTraversal` if any member's name would resolve outside
    /// `dest_dir`.
    fn extract_archive(&self, archive: &Path, dest_dir: &Path) -> PenpalResult<()>;
}

/// `sources` is non-empty and every entry shares the same parent directory.
fn common_parent(sources: &[PathBuf]) -> PenpalResult<&Path> {
    let first = sources.first().ok_or_else(|| Other("create_archive called with no sources".to_string()))?;
    let parent = first.parent().unwrap_or_else(|| Path::new(""));
    for src in sources {
        if src.parent().unwrap_or_else(|| Path::new("")) != parent {
            return penpal_err!(Other, format!("sources do not share a common parent: {:?} vs {:?}", first, src));
        }
    }
    Ok(parent)
}

/// Reject any member name that could escape `dest_dir` once joined to it:
/// absolute paths and any path containing a `..` component.
fn reject_traversal(member: &str) -> PenpalResult<()> {
    let path = Path::new(member);
    let escapes = path.is_absolute() || path.components().any(|c| matches!(c, std::path::Component::ParentDir));
    match escapes {
        true => penpal_err!(PathTraversal, PathBuf::from(member)),
        false => Ok(()),
    }
}
