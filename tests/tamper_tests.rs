//! tests/tamper_tests.rs
//! Every modification of a container must be rejected, never silently accepted

mod common;
use common::{config, init_tracing, open, password, pseudo_random, seal};

use framecrypt::{decrypt, encrypt, Corruption, EngineConfig, FramecryptError, PasswordString};
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn is_rejected(err: &FramecryptError) -> bool {
    matches!(
        err,
        FramecryptError::CorruptedContainer(_) | FramecryptError::SizeMismatch { .. }
    )
}

#[test]
fn flipping_any_body_byte_is_corruption() {
    init_tracing();
    let data = pseudo_random(100, 42);
    let container = seal(&data);

    for i in 32..container.len() {
        let mut bad = container.clone();
        bad[i] ^= 0x01;
        let err = open(&bad).unwrap_err();
        assert!(
            matches!(err, FramecryptError::CorruptedContainer(_)),
            "byte {i}: {err:?}"
        );
    }
}

#[test]
fn flipping_tag_area_of_iv_is_format_tag_mismatch() {
    let container = seal(b"iv tamper");
    for i in 8..16 {
        let mut bad = container.clone();
        bad[i] ^= 0x80;
        let err = open(&bad).unwrap_err();
        assert_eq!(err.corruption(), Some(Corruption::FormatTag), "iv byte {i}");
    }
}

#[test]
fn flipping_length_area_of_iv_is_rejected() {
    let container = seal(&pseudo_random(64, 5));
    for i in 0..8 {
        let mut bad = container.clone();
        bad[i] ^= 0x01;
        let err = open(&bad).unwrap_err();
        assert!(is_rejected(&err), "iv byte {i}: {err:?}");
    }
}

#[test]
fn inflated_declared_length_is_size_mismatch() {
    // IV byte 1 lands on bit 8 of the decrypted length: 64 becomes 320 while the
    // format tag stays intact, so the payload runs out after 64 + 32 bytes.
    let mut container = seal(&[3u8; 64]);
    container[1] ^= 0x01;

    let err = open(&container).unwrap_err();
    assert!(
        matches!(err, FramecryptError::SizeMismatch { declared: 320, actual: 96 }),
        "{err:?}"
    );
}

#[test]
fn size_mismatch_keeps_streamed_bytes_in_sink() {
    let mut container = seal(&[3u8; 64]);
    container[1] ^= 0x01;

    let mut out = Vec::new();
    let err = decrypt(Cursor::new(&container), &mut out, &password(), &config()).unwrap_err();
    assert!(matches!(err, FramecryptError::SizeMismatch { declared: 320, actual } if actual == out.len() as u64));
}

#[test]
fn flipping_salt_is_corruption() {
    let container = seal(b"salt tamper");
    for i in 16..32 {
        let mut bad = container.clone();
        bad[i] ^= 0x01;
        let err = open(&bad).unwrap_err();
        assert!(
            matches!(err, FramecryptError::CorruptedContainer(_)),
            "salt byte {i}: {err:?}"
        );
    }
}

#[test]
fn wrong_password_is_corruption() {
    let container = seal(b"secret");
    let wrong = PasswordString::from("hello".to_string());

    let err = decrypt(Cursor::new(&container), Vec::new(), &wrong, &config()).unwrap_err();
    assert!(matches!(err, FramecryptError::CorruptedContainer(_)), "{err:?}");
}

#[test]
fn foreign_format_tag_is_rejected_before_payload() {
    let container = seal(b"tagged");
    let other = EngineConfig::new(common::TEST_FORMAT_TAG ^ 1);

    let mut out = Vec::new();
    let err = decrypt(Cursor::new(&container), &mut out, &password(), &other).unwrap_err();
    assert_eq!(err.corruption(), Some(Corruption::FormatTag));
    assert!(out.is_empty(), "no plaintext may be emitted before the tag check");
}

#[test]
fn every_truncation_is_rejected() {
    let container = seal(&pseudo_random(70, 9));
    for cut in 0..container.len() {
        let err = open(&container[..cut]).unwrap_err();
        assert!(is_rejected(&err), "cut at {cut}: {err:?}");
    }
}

#[test]
fn truncated_header_is_truncated() {
    let container = seal(b"x");
    for cut in [0, 1, 16, 31, 32] {
        let err = open(&container[..cut]).unwrap_err();
        assert_eq!(err.corruption(), Some(Corruption::Truncated), "cut at {cut}");
    }
}

#[test]
fn partial_final_block_is_truncated() {
    let container = seal(b"partial");
    let err = open(&container[..container.len() - 1]).unwrap_err();
    assert_eq!(err.corruption(), Some(Corruption::Truncated));
}

#[test]
fn appended_bytes_are_rejected() {
    let container = seal(b"appendix");
    for extra in [1usize, 15, 16, 17, 32] {
        let mut bad = container.clone();
        bad.extend(std::iter::repeat(0xA5).take(extra));
        let err = open(&bad).unwrap_err();
        assert!(
            matches!(err, FramecryptError::CorruptedContainer(_)),
            "{extra} extra bytes: {err:?}"
        );
    }
}

#[test]
fn appending_a_copied_block_is_rejected() {
    let container = seal(b"replay");
    let mut bad = container.clone();
    bad.extend_from_slice(&container[container.len() - 16..]);
    assert!(open(&bad).is_err());
}

#[test]
fn cancelled_encrypt_stops() {
    let flag = Arc::new(AtomicBool::new(true));
    let cfg = config().with_cancel_flag(flag);

    let err = encrypt(Cursor::new(vec![0u8; 1024]), Vec::new(), &password(), &cfg).unwrap_err();
    assert!(matches!(err, FramecryptError::Cancelled));
}

#[test]
fn cancelled_decrypt_stops() {
    let container = seal(&pseudo_random(4096, 2));
    let flag = Arc::new(AtomicBool::new(false));
    let cfg = config().with_chunk_size(512).with_cancel_flag(flag.clone());

    flag.store(true, Ordering::SeqCst);
    let err = decrypt(Cursor::new(&container), Vec::new(), &password(), &cfg).unwrap_err();
    assert!(matches!(err, FramecryptError::Cancelled));

    flag.store(false, Ordering::SeqCst);
    let n = decrypt(Cursor::new(&container), Vec::new(), &password(), &cfg).unwrap();
    assert_eq!(n, 4096);
}
