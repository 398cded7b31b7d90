use crate::{fs_util::*, prelude::*};
use std::{
    env,
    fs::create_dir,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

/// Mode bits required of every pad directory and every temp working
/// directory allocated under one: `owner=rwx, group=---, world=---`.
pub const SECURE_DIR_MODE: u32 = 0o700;

/// Mode bits required of a block file once it has been written: `owner=r--`.
pub const SECURE_BLOCK_MODE: u32 = 0o400;

/// `(read, write, execute)` permission triple.
pub type PermTriple = (bool, bool, bool);

fn perm_triple(mode: u32, shift: u32) -> PermTriple {
    let bits = (mode >> shift) & 0o7;
    (bits & 0o4 != 0, bits & 0o2 != 0, bits & 0o1 != 0)
}

/// User-level `(read, write, execute)` permissions of `path`.
pub fn user_perms<P: AsRef<Path>>(path: P) -> PenpalResult<PermTriple> {
    Ok(perm_triple(mode_bits(path)?, 6))
}

/// Group-level `(read, write, execute)` permissions of `path`.
pub fn group_perms<P: AsRef<Path>>(path: P) -> PenpalResult<PermTriple> {
    Ok(perm_triple(mode_bits(path)?, 3))
}

/// World-level `(read, write, execute)` permissions of `path`.
pub fn world_perms<P: AsRef<Path>>(path: P) -> PenpalResult<PermTriple> {
    Ok(perm_triple(mode_bits(path)?, 0))
}

/// Ensure `path` is a directory whose mode is exactly
/// `owner=rwx, group=---, world=---` (octal 700).
pub fn assert_secure_dir<P: AsRef<Path>>(path: P) -> PenpalResult<()> {
    let path = path.as_ref();
    if !path.exists() {
        return penpal_err!(PathMissing, path.to_path_buf());
    }
    if !path.is_dir() {
        return penpal_err!(NotADirectory, path.to_path_buf());
    }
    match (user_perms(path)?, group_perms(path)?, world_perms(path)?) {
        ((true, true, true), (false, false, false), (false, false, false)) => Ok(()),
        _ => penpal_err!(InsecurePermissions, path.to_path_buf()),
    }
}

/// Returns the configured pad root, creating it with mode 700 if absent.
///
/// Defaults to `$HOME/.pad`; overridden by `PENPAL_PAD_ROOT` when set, so the
/// path is always threaded as a value rather than read from global state by
/// any of the crate's other modules.
pub fn pad_root() -> PenpalResult<PathBuf> {
    let root = match env::var_os("PENPAL_PAD_ROOT") {
        Some(path) => PathBuf::from(path),
        None => {
            let home = env::var_os("HOME").ok_or_else(|| Other("HOME is not set".to_string()))?;
            PathBuf::from(home).join(".pad")
        }
    };

    if !root.exists() {
        create_dir(&root)?;
        chmod(&root, SECURE_DIR_MODE)?;
    }
    assert_secure_dir(&root)?;
    Ok(root)
}

/// The pad used when the CLI is invoked without an explicit pad path:
/// `DEFAULT_PAD_NAME` under [`pad_root`]. This is a location, not a
/// guarantee — callers still go through `pad::create_pad`/`assert_secure_dir`
/// to find out whether it actually exists yet.
pub fn default_pad_path() -> PenpalResult<PathBuf> {
    Ok(pad_root()?.join(DEFAULT_PAD_NAME))
}

/// A uniquely named, mode-700 directory created under `parent` for the
/// duration of a single encrypt/decrypt session. Its contents are
/// recursively unlinked when this handle is dropped, on every exit path
/// (success, error, or panic unwind) — it is never left to the caller to
/// remember cleanup.
#[derive(Debug)]
pub struct ScopedTempDir(TempDir);

impl ScopedTempDir {
    pub fn new(parent: &Path) -> PenpalResult<Self> {
        assert_secure_dir(parent)?;
        let dir = tmpdir!(parent)?;
        chmod(dir.path(), SECURE_DIR_MODE)?;
        Ok(Self(dir))
    }

    pub fn path(&self) -> &Path {
        self.0.path()
    }
}
