use super::{pad_with_block_size, secure_dir};
use crate::{
    archiver::{Archiver, FakeArchiver},
    crypt::{Decrypter, Encrypter},
    fs_util::*,
    manifest::Manifest,
    prelude::*,
};
use std::fs::{create_dir, read, write};

#[test]
fn encrypt_on_empty_pad_fails_and_produces_no_output() {
    let parent = secure_dir();
    let pad_path = parent.path().join("pad");
    create_dir(&pad_path).unwrap();
    chmod(&pad_path, 0o700).unwrap();

    let src = parent.path().join("src");
    write(&src, b"anything").unwrap();

    let archiver = FakeArchiver;
    let dest = parent.path().join("out.penpal");
    match Encrypter::new(&archiver).encrypt(&pad_path, &src, &dest) {
        Err(EmptyOneTimePad(p)) => assert_eq!(p, pad_path),
        other => panic!("expected EmptyOneTimePad, got {:?}", other),
    }
    assert!(!dest.exists());
}

#[test]
fn encrypt_on_insecure_pad_fails_without_reading_any_block() {
    let (parent, pad_path) = pad_with_block_size(512, 16);
    chmod(&pad_path, 0o750).unwrap();

    let blocks_before = crate::pad::block_count(&pad_path).unwrap();

    let src = parent.path().join("src");
    write(&src, b"anything").unwrap();

    let archiver = FakeArchiver;
    let dest = parent.path().join("out.penpal");
    match Encrypter::new(&archiver).encrypt(&pad_path, &src, &dest) {
        Err(InsecurePermissions(p)) => assert_eq!(p, pad_path),
        other => panic!("expected InsecurePermissions, got {:?}", other),
    }

    chmod(&pad_path, 0o700).unwrap();
    assert_eq!(crate::pad::block_count(&pad_path).unwrap(), blocks_before);
}

#[test]
fn decrypt_with_manifest_referencing_unknown_block_fails_and_leaves_no_plaintext() {
    let (parent, pad_path) = pad_with_block_size(512, 16);
    let src = parent.path().join("src");
    write(&src, b"small file").unwrap();

    let archiver = FakeArchiver;
    let encrypted = parent.path().join("out.penpal");
    Encrypter::new(&archiver).encrypt(&pad_path, &src, &encrypted).unwrap();

    let blocks_before = crate::pad::block_count(&pad_path).unwrap();

    // splice a bogus block name in front of the real manifest, then
    // re-archive, simulating a tampered ciphertext file.
    let scratch = tmpdir!().unwrap();
    archiver.extract_archive(&encrypted, scratch.path()).unwrap();
    let real_manifest = Manifest::read_from(scratch.path().join(MANIFEST_FILENAME)).unwrap();
    let mut tampered = Manifest::new();
    tampered.push("f".repeat(64));
    for name in real_manifest.names() {
        tampered.push(name.clone());
    }
    tampered.write_to(scratch.path().join(MANIFEST_FILENAME)).unwrap();
    archiver
        .create_archive(&[scratch.path().join(MANIFEST_FILENAME), scratch.path().join(CIPHER_FILENAME)], &encrypted)
        .unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    match Decrypter::new(&archiver).decrypt(&pad_path, &encrypted, Some(out_dir.path())) {
        Err(BlockNotFound(name)) => assert_eq!(name, "f".repeat(64)),
        other => panic!("expected BlockNotFound, got {:?}", other),
    }

    assert!(read(out_dir.path().join("src")).is_err());
    assert_eq!(crate::pad::block_count(&pad_path).unwrap(), blocks_before, "no block should have been consumed");
}
