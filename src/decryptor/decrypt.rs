//! src/decryptor/decrypt.rs
//! Container decryption: drives the decode state machine to completion

use crate::aliases::PasswordString;
use crate::config::EngineConfig;
use crate::decryptor::state::FrameDecoder;
use crate::error::FramecryptError;
use std::io::{Read, Write};
use tracing::debug;

/// Decrypt one container from `input` into `output` and return the plaintext length.
///
/// Plaintext is streamed to `output` before the digest is checked, so on any error
/// the sink may already hold unverified bytes. Callers writing to a file should
/// treat it as garbage when this returns `Err`.
///
/// A wrong password is reported as [`FramecryptError::CorruptedContainer`], the same
/// as tampering; the two cannot be told apart from the container alone.
#[inline]
pub fn decrypt<R, W>(
    input: R,
    output: W,
    password: &PasswordString,
    config: &EngineConfig,
) -> Result<u64, FramecryptError>
where
    R: Read,
    W: Write,
{
    debug!(chunk_size = config.chunk_size(), "decrypting container");

    let mut decoder = FrameDecoder::new(input, output, password, config);
    let declared = decoder.run()?;

    debug!(plaintext_len = declared, "container decrypted");
    Ok(declared)
}
