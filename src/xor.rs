use crate::secure_vec::*;

/// Byte-wise XOR of `data` against `key`. `key` must be at least as long as
/// `data`; only the first `data.len()` bytes of `key` are consumed, the rest
/// is discarded. Every byte is combined the same way regardless of value, so
/// there is nothing for a timing side channel to branch on.
pub fn xor(data: &[u8], key: &[u8]) -> SecureBytes {
    assert!(key.len() >= data.len(), "xor: key shorter than data ({} < {})", key.len(), data.len());
    data.iter().zip(key.iter()).map(|(d, k)| d ^ k).collect::<Vec<u8>>().into()
}
