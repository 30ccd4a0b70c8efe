//! src/encryptor/encrypt.rs
//! Container encryption: header, frame prefix, streamed payload, digest, padding

use crate::aliases::PasswordString;
use crate::config::EngineConfig;
use crate::crypto::cipher::CipherParams;
use crate::encryptor::stream::encrypt_payload;
use crate::encryptor::write::{write_digest, write_frame_prefix};
use crate::error::FramecryptError;
use crate::header::{EncryptionHeader, FramePrefix};
use std::io::{self, Read, Seek, SeekFrom, Write};
use tracing::debug;

/// Encrypt everything from the current position of `input` to its end.
///
/// The plaintext length is measured by seeking, so `input` must be seekable; use
/// [`encrypt_sized`] for pipes and other one-way sources.
///
/// # Thread Safety
///
/// Calls are independent: each generates its own IV and salt and derives its own key.
/// Any number may run concurrently.
///
/// # Example
///
/// ```
/// use framecrypt::{decrypt, encrypt, EngineConfig, PasswordString};
/// use std::io::Cursor;
///
/// let config = EngineConfig::default();
/// let password = PasswordString::from("correct horse".to_string());
///
/// let mut container = Vec::new();
/// encrypt(Cursor::new(b"attack at dawn"), &mut container, &password, &config)?;
///
/// let mut plaintext = Vec::new();
/// decrypt(Cursor::new(&container), &mut plaintext, &password, &config)?;
/// assert_eq!(plaintext, b"attack at dawn");
/// # Ok::<(), framecrypt::FramecryptError>(())
/// ```
pub fn encrypt<R, W>(
    mut input: R,
    output: W,
    password: &PasswordString,
    config: &EngineConfig,
) -> Result<(), FramecryptError>
where
    R: Read + Seek,
    W: Write,
{
    let start = input.stream_position()?;
    let end = input.seek(SeekFrom::End(0))?;
    input.seek(SeekFrom::Start(start))?;

    encrypt_sized(input, end.saturating_sub(start), output, password, config)
}

/// Encrypt exactly `plaintext_len` bytes read from `input`.
///
/// Fails with [`FramecryptError::SizeMismatch`] if `input` ends early.
pub fn encrypt_sized<R, W>(
    input: R,
    plaintext_len: u64,
    output: W,
    password: &PasswordString,
    config: &EngineConfig,
) -> Result<(), FramecryptError>
where
    R: Read,
    W: Write,
{
    let header = EncryptionHeader::generate()?;
    encrypt_with_fixed_header(input, plaintext_len, output, password, config, &header)
}

/// Encrypt with a caller-supplied IV and salt.
///
/// Deterministic: same inputs, same bytes out. Reusing a header across real files
/// defeats the randomized-header property, so this is for tests and fuzzing only.
pub fn encrypt_with_fixed_header<R, W>(
    mut input: R,
    plaintext_len: u64,
    mut output: W,
    password: &PasswordString,
    config: &EngineConfig,
    header: &EncryptionHeader,
) -> Result<(), FramecryptError>
where
    R: Read,
    W: Write,
{
    let declared = i64::try_from(plaintext_len).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "plaintext length exceeds i64::MAX",
        )
    })?;

    debug!(
        plaintext_len,
        chunk_size = config.chunk_size(),
        "encrypting container"
    );

    // === Unencrypted header ===
    header.write_to(&mut output)?;

    // === Derive key, open the encrypting transform ===
    let params = CipherParams::derive(password, header);
    let mut sink = params.encryptor(&mut output);

    // === Frame ===
    write_frame_prefix(
        &mut sink,
        &FramePrefix {
            plaintext_len: declared,
            format_tag: config.format_tag(),
        },
    )?;
    let digest = encrypt_payload(&mut input, &mut sink, plaintext_len, config)?;
    write_digest(&mut sink, &digest)?;

    // === Pad + flush ===
    sink.finish()?;
    output.flush()?;

    debug!(plaintext_len, "container encrypted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::encrypted_len;
    use std::io::Cursor;

    fn password() -> PasswordString {
        PasswordString::from("testpass".to_string())
    }

    #[test]
    fn output_size_matches_layout() {
        let config = EngineConfig::default();
        for len in [0usize, 1, 15, 16, 17, 100, 1000] {
            let mut out = Vec::new();
            encrypt(Cursor::new(vec![9u8; len]), &mut out, &password(), &config).unwrap();
            assert_eq!(out.len() as u64, encrypted_len(len as u64), "len {len}");
        }
    }

    #[test]
    fn fixed_header_is_deterministic() {
        let config = EngineConfig::new(5);
        let header = EncryptionHeader::from_parts([1; 16], [2; 16]);

        let mut a = Vec::new();
        let mut b = Vec::new();
        encrypt_with_fixed_header(Cursor::new(b"hello"), 5, &mut a, &password(), &config, &header)
            .unwrap();
        encrypt_with_fixed_header(Cursor::new(b"hello"), 5, &mut b, &password(), &config, &header)
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(&a[..32], header.to_bytes().as_slice());
    }

    #[test]
    fn encrypt_starts_at_current_position() {
        let config = EngineConfig::default();
        let mut input = Cursor::new(b"skip-me:payload".to_vec());
        input.set_position(8);

        let mut out = Vec::new();
        encrypt(&mut input, &mut out, &password(), &config).unwrap();
        assert_eq!(out.len() as u64, encrypted_len(7));
    }

    #[test]
    fn chunk_size_does_not_change_ciphertext() {
        let header = EncryptionHeader::from_parts([3; 16], [4; 16]);
        let data: Vec<u8> = (0..5000u32).map(|i| i as u8).collect();

        let mut small = Vec::new();
        let mut large = Vec::new();
        encrypt_with_fixed_header(
            Cursor::new(&data),
            5000,
            &mut small,
            &password(),
            &EngineConfig::new(1).with_chunk_size(7),
            &header,
        )
        .unwrap();
        encrypt_with_fixed_header(
            Cursor::new(&data),
            5000,
            &mut large,
            &password(),
            &EngineConfig::new(1).with_chunk_size(1 << 20),
            &header,
        )
        .unwrap();

        assert_eq!(small, large);
    }
}
