use super::pad_with_block_size;
use crate::{archiver::FakeArchiver, crypt::Decrypter, crypt::Encrypter};
use std::fs::{read, write};

fn round_trip(plaintext: &[u8], block_size: usize, pad_bytes: usize) -> (usize, usize) {
    let (parent, pad_path) = pad_with_block_size(pad_bytes, block_size);
    let src = parent.path().join("src");
    write(&src, plaintext).unwrap();

    let archiver = FakeArchiver;
    let encrypted = parent.path().join("out.penpal");
    let enc_report = Encrypter::new(&archiver).encrypt(&pad_path, &src, &encrypted).unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let dec_report = Decrypter::new(&archiver).decrypt(&pad_path, &encrypted, Some(out_dir.path())).unwrap();

    assert_eq!(read(out_dir.path().join("src")).unwrap(), plaintext);
    assert!(!encrypted.exists());
    assert_eq!(enc_report.blocks_consumed, dec_report.blocks_consumed);
    (enc_report.blocks_consumed, enc_report.ciphertext_bytes)
}

#[test]
fn tiny_file_round_trips() {
    let (blocks, _) = round_trip(b"Hello", 16, 512);
    assert!(blocks >= 1);
}

#[test]
fn multi_block_plaintext_round_trips() {
    let plaintext: Vec<u8> = (0u8..40).collect();
    let (blocks, cipher_len) = round_trip(&plaintext, 16, 1 << 16);
    assert_eq!(blocks, (cipher_len + 15) / 16);
    assert!(blocks >= 3, "40 bytes of plaintext plus archive overhead should span at least 3 blocks of 16 bytes");
}

#[test]
fn plaintext_at_exact_block_multiple_round_trips() {
    // FakeArchiver bundles "src" (4 + 3 + 4 + N bytes): pick N so the bundle
    // size lands on an exact multiple of the block size, exercising the
    // boundary where the final loop iteration must still terminate cleanly.
    let block_size = 16;
    let bundle_overhead = 4 + "src".len() + 4;
    let plaintext_len = block_size * 4 - bundle_overhead;
    let plaintext = vec![0xABu8; plaintext_len];

    let (blocks, cipher_len) = round_trip(&plaintext, block_size, 1 << 16);
    assert_eq!(blocks, 4);
    assert_eq!(cipher_len, plaintext_len + bundle_overhead);
}

#[test]
fn manifest_entry_count_matches_loop_iterations() {
    let plaintext = vec![0x42u8; 100];
    let (parent, pad_path) = pad_with_block_size(1 << 16, 16);
    let src = parent.path().join("src");
    write(&src, &plaintext).unwrap();

    let archiver = FakeArchiver;
    let encrypted = parent.path().join("out.penpal");
    let report = Encrypter::new(&archiver).encrypt(&pad_path, &src, &encrypted).unwrap();

    let bundle_size = report.plaintext_bytes;
    assert_eq!(report.blocks_consumed, (bundle_size + 15) / 16);
}
