//! # Decode State Machine
//!
//! Container decoding as explicit, individually steppable states:
//!
//! ```text
//! ReadHeader → ReadLengthAndTag → StreamPayload { remaining } → ReadAndVerifyDigest → Done
//! ```
//!
//! Any error moves the decoder to the terminal [`DecodeState::Failed`].
//!
//! `StreamPayload` advances one chunk per [`FrameDecoder::step`] and moves on as soon as
//! `remaining` hits zero, so a zero-length payload goes straight to the digest and a
//! payload that is an exact multiple of the chunk size never issues an empty read.
//! Reading is bounded by the declared length, so the trailing digest is never
//! mistaken for payload.

use crate::aliases::{ChunkBuffer, PasswordString};
use crate::config::EngineConfig;
use crate::crypto::cipher::{CbcDecryptor, CipherParams};
use crate::crypto::digest::IntegrityVerifier;
use crate::decryptor::read::{read_digest, read_frame_prefix};
use crate::error::FramecryptError;
use crate::header::EncryptionHeader;
use std::io::{Read, Write};
use std::mem;
use tracing::{trace, warn};

/// Where a [`FrameDecoder`] currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    /// Next: read IV + salt, derive the key, start the decrypting transform.
    ReadHeader,
    /// Next: decrypt the plaintext length and format tag.
    ReadLengthAndTag,
    /// Streaming payload; `remaining` bytes still to produce.
    StreamPayload { declared: u64, remaining: u64 },
    /// Next: read the stored digest, compare, and close the transform.
    ReadAndVerifyDigest { declared: u64 },
    /// Container fully verified; `declared` bytes were written to the sink.
    Done { declared: u64 },
    /// A step returned an error; the decoder cannot continue.
    Failed,
}

enum Source<R: Read> {
    Raw(R),
    Decrypting(CbcDecryptor<R>),
    Spent,
}

/// Steppable container decoder over a ciphertext source and a plaintext sink.
pub struct FrameDecoder<'a, R: Read, W: Write> {
    state: DecodeState,
    source: Source<R>,
    sink: W,
    password: &'a PasswordString,
    config: &'a EngineConfig,
    verifier: IntegrityVerifier,
    buffer: ChunkBuffer,
    written: u64,
}

impl<'a, R: Read, W: Write> FrameDecoder<'a, R, W> {
    pub fn new(source: R, sink: W, password: &'a PasswordString, config: &'a EngineConfig) -> Self {
        Self {
            state: DecodeState::ReadHeader,
            source: Source::Raw(source),
            sink,
            password,
            config,
            verifier: IntegrityVerifier::new(),
            buffer: ChunkBuffer::new(Vec::new()),
            written: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Plaintext bytes written to the sink so far.
    #[must_use]
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Advance by one state (or one payload chunk) and return the new state.
    ///
    /// Calling `step` in [`DecodeState::Done`] is a no-op. The first error moves the
    /// decoder to [`DecodeState::Failed`]; every later call returns
    /// [`FramecryptError::DecoderFailed`].
    pub fn step(&mut self) -> Result<DecodeState, FramecryptError> {
        let result = match self.state {
            DecodeState::ReadHeader => self.read_header(),
            DecodeState::ReadLengthAndTag => self.read_length_and_tag(),
            DecodeState::StreamPayload { declared, remaining } => {
                self.stream_payload(declared, remaining)
            }
            DecodeState::ReadAndVerifyDigest { declared } => self.verify_digest(declared),
            DecodeState::Done { .. } => return Ok(self.state),
            DecodeState::Failed => return Err(FramecryptError::DecoderFailed),
        };
        match result {
            Ok(next) => {
                trace!(from = ?self.state, to = ?next, "decode step");
                self.state = next;
                Ok(next)
            }
            Err(e) => {
                trace!(from = ?self.state, error = %e, "decode step failed");
                self.state = DecodeState::Failed;
                Err(e)
            }
        }
    }

    /// Drive the machine to [`DecodeState::Done`] and return the plaintext length.
    pub fn run(&mut self) -> Result<u64, FramecryptError> {
        loop {
            if let DecodeState::Done { declared } = self.step()? {
                return Ok(declared);
            }
        }
    }

    /// Hand back the plaintext sink.
    pub fn into_sink(self) -> W {
        self.sink
    }

    fn read_header(&mut self) -> Result<DecodeState, FramecryptError> {
        let Source::Raw(mut raw) = mem::replace(&mut self.source, Source::Spent) else {
            unreachable!("header is read exactly once, from the raw source");
        };
        let header = EncryptionHeader::read_from(&mut raw)?;
        let params = CipherParams::derive(self.password, &header);
        self.source = Source::Decrypting(params.decryptor(raw));
        Ok(DecodeState::ReadLengthAndTag)
    }

    fn read_length_and_tag(&mut self) -> Result<DecodeState, FramecryptError> {
        let Source::Decrypting(decryptor) = &mut self.source else {
            unreachable!("decrypting transform exists after the header");
        };
        let prefix = read_frame_prefix(decryptor)?;
        let declared = prefix.validate(self.config.format_tag()).inspect_err(|e| {
            warn!(error = %e, "frame prefix rejected");
        })?;

        let chunk = usize::try_from(declared)
            .unwrap_or(usize::MAX)
            .min(self.config.chunk_size());
        self.buffer = ChunkBuffer::new(vec![0u8; chunk]);

        Ok(DecodeState::StreamPayload {
            declared,
            remaining: declared,
        })
    }

    fn stream_payload(&mut self, declared: u64, remaining: u64) -> Result<DecodeState, FramecryptError> {
        if remaining == 0 {
            return Ok(DecodeState::ReadAndVerifyDigest { declared });
        }
        self.config.check_cancelled()?;

        let Source::Decrypting(decryptor) = &mut self.source else {
            unreachable!("decrypting transform exists while streaming");
        };
        let want = usize::try_from(remaining)
            .unwrap_or(usize::MAX)
            .min(self.buffer.len());
        let got = decryptor.read(&mut self.buffer[..want])?;
        if got == 0 {
            warn!(declared, actual = self.written, "payload ended before declared length");
            return Err(FramecryptError::SizeMismatch {
                declared,
                actual: self.written,
            });
        }

        self.sink.write_all(&self.buffer[..got])?;
        self.verifier.observe(&self.buffer[..got]);
        self.written += got as u64;

        let remaining = remaining - got as u64;
        if remaining == 0 {
            Ok(DecodeState::ReadAndVerifyDigest { declared })
        } else {
            Ok(DecodeState::StreamPayload { declared, remaining })
        }
    }

    fn verify_digest(&mut self, declared: u64) -> Result<DecodeState, FramecryptError> {
        let Source::Decrypting(mut decryptor) = mem::replace(&mut self.source, Source::Spent) else {
            unreachable!("decrypting transform exists until the digest is verified");
        };

        let stored = read_digest(&mut decryptor)?;
        mem::take(&mut self.verifier)
            .verify(&stored[..])
            .inspect_err(|_| warn!("integrity digest mismatch"))?;
        decryptor
            .finish()
            .inspect_err(|e| warn!(error = %e, "container trailer rejected"))?;

        self.sink.flush()?;
        if self.written != declared {
            warn!(declared, actual = self.written, "plaintext size mismatch");
            return Err(FramecryptError::SizeMismatch {
                declared,
                actual: self.written,
            });
        }
        Ok(DecodeState::Done { declared })
    }
}
