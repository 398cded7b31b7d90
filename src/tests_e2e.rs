//! End-to-end round-trip and failure scenarios, exercising `Encrypter`/
//! `Decrypter` through the same paths `main.rs` dispatches to, with
//! `FakeArchiver` standing in for the system `tar` binary so these tests
//! don't depend on what's installed wherever `cargo test` runs.

mod fail;
mod success;

use crate::{fs_util::*, prelude::*, secure_fs::SECURE_DIR_MODE};
use tempfile::TempDir;

fn secure_dir() -> TempDir {
    let dir = tmpdir!().unwrap();
    chmod(dir.path(), SECURE_DIR_MODE).unwrap();
    dir
}

/// A fresh pad directory under a fresh secure parent, populated with blocks
/// of `block_size` bytes totalling at least `total_bytes`. Returns the
/// parent (kept alive for the pad's lifetime) and the pad's own path.
fn pad_with_block_size(total_bytes: usize, block_size: usize) -> (TempDir, std::path::PathBuf) {
    let parent = secure_dir();
    let pad_path = parent.path().join("pad");
    crate::pad::create_pad_with_block_size(&pad_path, total_bytes, block_size).unwrap();
    (parent, pad_path)
}
