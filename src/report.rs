use crate::crypt::{DecryptReport, EncryptReport};
use std::path::Path;

macro_rules! field {
    ( $label:expr, $value:expr ) => {
        eprintln!("  {:<17} {}", concat!($label, ":"), $value);
    };
}

/// Print an aligned `--verbose` summary of a completed `create_pad` call.
pub fn pad_created(path: &Path, size_bytes: usize, blocks: usize) {
    eprintln!("pad created");
    field!("path", path.display());
    field!("requested bytes", size_bytes);
    field!("blocks written", blocks);
}

/// Print an aligned `--verbose` summary of a completed `encrypt` call.
pub fn encrypted(dest: &Path, report: &EncryptReport) {
    eprintln!("encrypted");
    field!("dest", dest.display());
    field!("blocks consumed", report.blocks_consumed);
    field!("plaintext bytes", report.plaintext_bytes);
    field!("ciphertext bytes", report.ciphertext_bytes);
}

/// Print an aligned `--verbose` summary of a completed `decrypt` call.
pub fn decrypted(dest_dir: &Path, report: &DecryptReport) {
    eprintln!("decrypted");
    field!("dest", dest_dir.display());
    field!("blocks consumed", report.blocks_consumed);
    field!("ciphertext bytes", report.ciphertext_bytes);
    field!("plaintext bytes", report.plaintext_bytes);
}
