use crate::{
    archiver::Archiver,
    fs_util::*,
    manifest::Manifest,
    pad::{self, PadLock},
    prelude::*,
    secure_fs::*,
};
use std::{
    fs::{remove_file, File},
    io::{BufRead, BufReader, Write},
    path::Path,
};

/// Summary of one `decrypt` call, surfaced to `--verbose` reporting.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecryptReport {
    pub blocks_consumed: usize,
    pub ciphertext_bytes: usize,
    pub plaintext_bytes: usize,
}

/// Orchestrates outer archive → ciphertext + manifest → streaming XOR (in
/// manifest order) → inner archive → restored plaintext.
pub struct Decrypter<'a> {
    archiver: &'a dyn Archiver,
}

impl<'a> Decrypter<'a> {
    pub fn new(archiver: &'a dyn Archiver) -> Self {
        Self { archiver }
    }

    pub fn decrypt(&self, pad_path: &Path, encrypted_file_path: &Path, out_dir: Option<&Path>) -> PenpalResult<DecryptReport> {
        // 1. Preflight.
        if !pad_path.exists() {
            return penpal_err!(PathMissing, pad_path.to_path_buf());
        }
        if !encrypted_file_path.exists() {
            return penpal_err!(PathMissing, encrypted_file_path.to_path_buf());
        }
        assert_secure_dir(pad_path)?;
        self.archiver.preflight()?;

        let _lock = PadLock::acquire(pad_path)?;

        // 2. Unbundle.
        let temp = ScopedTempDir::new(pad_path)?;
        self.archiver.extract_archive(encrypted_file_path, temp.path())?;

        let mut members = self.archiver.list_members(encrypted_file_path)?;
        members.sort();
        let mut expected = vec![MANIFEST_FILENAME.to_string(), CIPHER_FILENAME.to_string()];
        expected.sort();
        if members != expected {
            return penpal_err!(MalformedCiphertext, format!("expected exactly {:?}, got {:?}", expected, members));
        }

        // 3. Decrypt stream.
        let manifest = Manifest::read_from(temp.path().join(MANIFEST_FILENAME))?;
        let cipher_path = temp.path().join(CIPHER_FILENAME);
        let plaintext = self.decrypt_stream(pad_path, &manifest, &cipher_path, encrypted_file_path)?;

        // 4. Emit.
        let content_archive_path = temp.path().join(CONTENT_ARCHIVE_FILENAME);
        {
            let mut f = fopen_w(&content_archive_path)?;
            f.write_all(plaintext.unsecure())?;
        }
        let dest_dir = match out_dir {
            Some(dir) => dir.to_path_buf(),
            None => encrypted_file_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| Path::new(".").to_path_buf()),
        };
        self.archiver.extract_archive(&content_archive_path, &dest_dir)?;
        remove_file(encrypted_file_path)?;

        // 5. Release: `temp` and `_lock` drop here, zeroizing as they go.
        Ok(DecryptReport {
            blocks_consumed: manifest.len(),
            ciphertext_bytes: std::fs::metadata(&cipher_path).map(|m| m.len() as usize).unwrap_or(0),
            plaintext_bytes: plaintext.len(),
        })
    }

    fn decrypt_stream(
        &self,
        pad_path: &Path,
        manifest: &Manifest,
        cipher_path: &Path,
        encrypted_file_path: &Path,
    ) -> PenpalResult<crate::secure_vec::SecureBytes> {
        let file = File::open(cipher_path)?;
        let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
        let mut plaintext: Vec<u8> = Vec::new();

        let names = manifest.names();
        for (i, name) in names.iter().enumerate() {
            let is_last = i + 1 == names.len();
            let key = pad::fetch_and_destroy_block_by_name(pad_path, name)?;
            let key_bytes = key.unsecure();

            let mut chunk = vec![0u8; key_bytes.len()];
            let n = read_up_to(&mut reader, &mut chunk)?;
            if n < key_bytes.len() && !is_last {
                return penpal_err!(MalformedCiphertext, format!("cipher stream ended before block `{}` was fully consumed", name));
            }
            chunk.truncate(n);

            let decoded = crate::xor::xor(&chunk, &key_bytes[..n]);
            plaintext.extend_from_slice(decoded.unsecure());
        }

        if !reader.fill_buf()?.is_empty() {
            return penpal_err!(ManifestTooShort, encrypted_file_path.to_path_buf());
        }

        Ok(plaintext.into())
    }
}
