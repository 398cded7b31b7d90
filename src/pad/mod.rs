mod lock;

pub use lock::PadLock;

use crate::{fs_util::*, hasher::sha3_256_hex, prelude::*, rand_util::*, secure_fs::*, secure_vec::*};
use std::{
    fs::{create_dir, remove_file},
    io::{Read, Write},
    path::Path,
};

/// Create a fresh pad directory at `path`, pre-filled with blocks totalling
/// at least `total_bytes` (ceil division by the configured standard block
/// size). `path`'s parent must already exist and pass `assert_secure_dir`;
/// nothing may already exist at `path` itself.
pub fn create_pad<P: AsRef<Path>>(path: P, total_bytes: usize) -> PenpalResult<()> {
    create_pad_with_block_size(path, total_bytes, std_block_size())
}

/// Same contract as [`create_pad`], but with the per-block size passed
/// explicitly instead of read from `PENPAL_STD_BLOCK_SIZE`/the compiled-in
/// default. `create_pad` is a thin wrapper over this; tests use this
/// directly so fixtures with different block sizes don't have to mutate
/// shared process environment state.
pub fn create_pad_with_block_size<P: AsRef<Path>>(path: P, total_bytes: usize, block_size: usize) -> PenpalResult<()> {
    let path = path.as_ref();
    if path.exists() {
        return penpal_err!(AlreadyExists, path.to_path_buf());
    }
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    if !parent.exists() {
        return penpal_err!(ParentMissing, path.to_path_buf());
    }
    assert_secure_dir(parent)?;

    create_dir(path)?;
    chmod(path, SECURE_DIR_MODE)?;

    let num_blocks = (total_bytes + block_size - 1) / block_size.max(1);
    for _ in 0..num_blocks {
        create_block(path, block_size)?;
    }
    Ok(())
}

/// Create one block of exactly `size` cryptographically random bytes inside
/// `pad_dir`, named by the hex-encoded SHA3-256 hash of its own content.
/// Writing is atomic: a temp file in `pad_dir` is written, then renamed to
/// its final hashed name, then set to mode 400. On the vanishingly unlikely
/// event of a name collision, the bytes are regenerated rather than reused.
pub fn create_block<P: AsRef<Path>>(pad_dir: P, size: usize) -> PenpalResult<String> {
    let pad_dir = pad_dir.as_ref();
    let max = max_block_size();
    if size > max {
        return penpal_err!(BlockTooLarge { requested: size, max });
    }
    assert_secure_dir(pad_dir)?;

    loop {
        let content = random_bytes(size);
        let name = sha3_256_hex(content.unsecure());
        let final_path = pad_dir.join(&name);
        if final_path.exists() {
            continue;
        }

        let mut tmp = tmpfile!(pad_dir)?;
        tmp.write_all(content.unsecure())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&final_path).map_err(|err| err.error)?;
        chmod(&final_path, SECURE_BLOCK_MODE)?;
        return Ok(name);
    }
}

/// Every block filename currently present in `pad_dir` (i.e. every direct
/// child whose name isn't the session lock file).
fn block_names<P: AsRef<Path>>(pad_dir: P) -> PenpalResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in ls(pad_dir)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().and_then(|n| n.to_str()) {
            if name != LOCK_FILENAME && entry.is_file() {
                names.push(name.to_string());
            }
        }
    }
    Ok(names)
}

/// Read and permanently unlink the block named `name` from `pad_dir`. The
/// file is removed before the bytes are returned to the caller: a crash
/// after the read but before this function returns would otherwise leave
/// reusable key material on disk.
fn consume_block(pad_dir: &Path, name: &str) -> PenpalResult<SecureBytes> {
    let path = pad_dir.join(name);
    let mut file = fopen_r(&path).map_err(|_| BlockNotFound(name.to_string()))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    drop(file);
    let bytes: SecureBytes = buf.into();
    remove_file(&path).map_err(|_| PadConsumptionError(name.to_string()))?;
    Ok(bytes)
}

/// Choose one block uniformly at random from `pad_dir`, read its full
/// contents, and unlink it before returning. Fails with `EmptyOneTimePad` if
/// the pad has no blocks left.
pub fn fetch_and_destroy_random_block<P: AsRef<Path>>(pad_dir: P) -> PenpalResult<(String, SecureBytes)> {
    let pad_dir = pad_dir.as_ref();
    let names = block_names(pad_dir)?;
    if names.is_empty() {
        return penpal_err!(EmptyOneTimePad, pad_dir.to_path_buf());
    }
    let name = names[random_index(names.len())].clone();
    let bytes = consume_block(pad_dir, &name)?;
    Ok((name, bytes))
}

/// Read and unlink the block named `name` from `pad_dir`. Fails with
/// `BlockNotFound` if no block with that name is present.
pub fn fetch_and_destroy_block_by_name<P: AsRef<Path>>(pad_dir: P, name: &str) -> PenpalResult<SecureBytes> {
    consume_block(pad_dir.as_ref(), name)
}

/// Number of block files currently present in `pad_dir`.
pub fn block_count<P: AsRef<Path>>(pad_dir: P) -> PenpalResult<usize> {
    Ok(block_names(pad_dir)?.len())
}
