use crate::secure_vec::*;
use rand::{rngs::OsRng, RngCore};

/// Generate `length` cryptographically random bytes, sourced from the OS's
/// non-blocking, kernel-seeded CSPRNG (`OsRng`). This is the only randomness
/// source the crate uses; nothing here is seedable, because nothing in
/// `penpal` ever needs the same "random" bytes twice.
pub fn random_bytes(length: usize) -> SecureBytes {
    let mut buffer = vec![0u8; length];
    OsRng.fill_bytes(&mut buffer[..]);
    buffer.into()
}

/// Pick an index uniformly at random in `[0, len)`, using the same OS CSPRNG
/// as `random_bytes`. Used by `Pad::fetch_and_destroy_random_block` to choose
/// which block file to consume.
///
/// # Panics
///
/// Panics if `len == 0`; callers must check for an empty pad first.
pub fn random_index(len: usize) -> usize {
    assert!(len > 0, "random_index called with an empty range");
    (OsRng.next_u64() % len as u64) as usize
}
