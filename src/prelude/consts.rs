use static_assertions::const_assert;
use std::env;

/// Default size of a single pad block when populating a fresh pad with
/// `Pad::create_pad`, in bytes.
pub const STD_BLOCK_SIZE_DEFAULT: usize = 1 << 19; // 512 KiB

/// Hard cap on the size of any single block, in bytes.
pub const MAX_BLOCK_SIZE_DEFAULT: usize = 1 << 20; // 1 MiB

/// Buffer size used when streaming plaintext/ciphertext through the XOR loop.
pub const BUFFER_SIZE: usize = 1 << 16;

/// Basename of the manifest member inside the outer archive.
pub const MANIFEST_FILENAME: &str = "manifest";

/// Basename of the raw XOR output member inside the outer archive.
pub const CIPHER_FILENAME: &str = "cipher.bin";

/// Basename of the inner archive holding the bundled plaintext.
pub const CONTENT_ARCHIVE_FILENAME: &str = "content.tgz";

/// Basename of the advisory lock file held for the duration of a session.
pub const LOCK_FILENAME: &str = ".lock";

/// Name of the pad created under the pad root when the CLI is invoked
/// without an explicit pad path.
pub const DEFAULT_PAD_NAME: &str = "default";

const_assert!(STD_BLOCK_SIZE_DEFAULT == 524288);
const_assert!(MAX_BLOCK_SIZE_DEFAULT == 1048576);
const_assert!(BUFFER_SIZE == 65536);

/// Effective standard block size, honoring `PENPAL_STD_BLOCK_SIZE` if set.
pub fn std_block_size() -> usize {
    env_override("PENPAL_STD_BLOCK_SIZE").unwrap_or(STD_BLOCK_SIZE_DEFAULT)
}

/// Effective max block size, honoring `PENPAL_MAX_BLOCK_SIZE` if set.
pub fn max_block_size() -> usize {
    env_override("PENPAL_MAX_BLOCK_SIZE").unwrap_or(MAX_BLOCK_SIZE_DEFAULT)
}

fn env_override(key: &str) -> Option<usize> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
