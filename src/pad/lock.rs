use crate::{fs_util::*, prelude::*};
use fs2::FileExt;
use std::{fs::File, path::Path};

/// Advisory exclusive lock on a pad directory's `.lock` sentinel file, held
/// for the duration of one `Encrypter`/`Decrypter` session. A second process
/// trying to acquire the same pad fails fast with `PadBusy` rather than
/// blocking — this is a single-session tool, not a queue.
pub struct PadLock {
    file: File,
}

impl PadLock {
    pub fn acquire(pad_dir: &Path) -> PenpalResult<Self> {
        let lock_path = pad_dir.join(LOCK_FILENAME);
        let file = fopen_w(&lock_path)?;
        file.try_lock_exclusive().map_err(|_| PadBusy(pad_dir.to_path_buf()))?;
        Ok(Self { file })
    }
}

impl Drop for PadLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
