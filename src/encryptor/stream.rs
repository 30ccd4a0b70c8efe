//! src/encryptor/stream.rs
//! Chunked payload streaming: plaintext goes to the cipher and the hash in lockstep

use crate::aliases::{ChunkBuffer, Digest32};
use crate::config::EngineConfig;
use crate::crypto::digest::IntegrityVerifier;
use crate::error::FramecryptError;
use std::io::{ErrorKind, Read, Write};

/// Stream exactly `plaintext_len` bytes from `source` into `sink`, hashing as it goes.
///
/// Reads at most `plaintext_len` bytes even if the source has more; a source that
/// ends early is a [`FramecryptError::SizeMismatch`], since the length is already
/// committed to the frame prefix.
pub fn encrypt_payload<R, W>(
    source: &mut R,
    sink: &mut W,
    plaintext_len: u64,
    config: &EngineConfig,
) -> Result<Digest32, FramecryptError>
where
    R: Read,
    W: Write,
{
    let mut verifier = IntegrityVerifier::new();
    let mut buffer = ChunkBuffer::new(vec![0u8; config.chunk_size()]);
    let mut limited = source.take(plaintext_len);

    loop {
        config.check_cancelled()?;

        let n = match limited.read(&mut buffer[..]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(FramecryptError::Io(e)),
        };

        sink.write_all(&buffer[..n])?;
        verifier.observe(&buffer[..n]);
    }

    if verifier.observed() != plaintext_len {
        return Err(FramecryptError::SizeMismatch {
            declared: plaintext_len,
            actual: verifier.observed(),
        });
    }

    Ok(verifier.finalize())
}
