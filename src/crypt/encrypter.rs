use crate::{
    archiver::Archiver,
    fs_util::*,
    manifest::Manifest,
    pad::{self, PadLock},
    prelude::*,
    secure_fs::*,
    xor::xor,
};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Summary of one `encrypt` call, surfaced to `--verbose` reporting.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncryptReport {
    pub blocks_consumed: usize,
    pub plaintext_bytes: usize,
    pub ciphertext_bytes: usize,
}

/// Orchestrates plaintext → inner archive → streaming XOR → manifest →
/// outer archive, per the component design's `encrypt` contract. Holds an
/// `&dyn Archiver` so tests can substitute a non-subprocess fake.
pub struct Encrypter<'a> {
    archiver: &'a dyn Archiver,
}

impl<'a> Encrypter<'a> {
    pub fn new(archiver: &'a dyn Archiver) -> Self {
        Self { archiver }
    }

    pub fn encrypt(&self, pad_path: &Path, source_path: &Path, dest_path: &Path) -> PenpalResult<EncryptReport> {
        // 1. Preflight.
        if !pad_path.exists() {
            return penpal_err!(PathMissing, pad_path.to_path_buf());
        }
        if !source_path.exists() {
            return penpal_err!(PathMissing, source_path.to_path_buf());
        }
        assert_secure_dir(pad_path)?;
        self.archiver.preflight()?;
        if pad::block_count(pad_path)? == 0 {
            return penpal_err!(EmptyOneTimePad, pad_path.to_path_buf());
        }

        let _lock = PadLock::acquire(pad_path)?;

        // 2. Stage.
        let temp = ScopedTempDir::new(pad_path)?;
        let content_archive_path = temp.path().join(CONTENT_ARCHIVE_FILENAME);
        self.archiver.create_archive(&[source_path.to_path_buf()], &content_archive_path)?;

        // 3. Encrypt stream.
        let (manifest, ciphertext) = self.encrypt_stream(pad_path, &content_archive_path)?;

        // 4. Emit.
        let manifest_path = temp.path().join(MANIFEST_FILENAME);
        let cipher_path = temp.path().join(CIPHER_FILENAME);
        manifest.write_to(&manifest_path)?;
        {
            let mut cipher_file = fopen_w(&cipher_path)?;
            cipher_file.write_all(ciphertext.unsecure())?;
        }
        self.archiver.create_archive(&[manifest_path, cipher_path], dest_path)?;

        // 5. Release: `temp` and `_lock` drop here, zeroizing as they go.
        Ok(EncryptReport {
            blocks_consumed: manifest.len(),
            plaintext_bytes: std::fs::metadata(&content_archive_path)?.len() as usize,
            ciphertext_bytes: ciphertext.len(),
        })
    }

    fn encrypt_stream(&self, pad_path: &Path, content_archive_path: &Path) -> PenpalResult<(Manifest, crate::secure_vec::SecureBytes)> {
        use std::io::BufRead;

        let file = File::open(content_archive_path)?;
        let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
        let mut manifest = Manifest::new();
        let mut ciphertext: Vec<u8> = Vec::new();

        loop {
            if reader.fill_buf()?.is_empty() {
                break;
            }

            let (name, key) = pad::fetch_and_destroy_random_block(pad_path)?;
            let key_bytes = key.unsecure();
            let mut cleartext = vec![0u8; key_bytes.len()];
            let n = read_up_to(&mut reader, &mut cleartext)?;
            cleartext.truncate(n);

            let chunk = xor(&cleartext, &key_bytes[..n]);
            ciphertext.extend_from_slice(chunk.unsecure());
            manifest.push(name);

            if n < key_bytes.len() {
                break;
            }
        }

        Ok((manifest, ciphertext.into()))
    }
}
