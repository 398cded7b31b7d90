use data_encoding::HEXLOWER;
use sha3::{Digest, Sha3_256};

/// Hash `content` with SHA3-256 and hex-encode the digest, lowercase.
///
/// This is the canonical name of a pad block: `Pad::create_block` names each
/// block file after `sha3_256_hex` of its own content, and every consumer
/// looks blocks up by this same name.
macro_rules! sha3_256_hex {
    ( $content:expr ) => {
        crate::hasher::sha3_256_hex($content)
    };
}

pub fn sha3_256_hex(content: &[u8]) -> String {
    let mut hasher = Sha3_256::new();
    hasher.update(content);
    HEXLOWER.encode(&hasher.finalize())
}
