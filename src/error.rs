//! # Error Types
//!
//! This module defines the error types used throughout the library.
//! All operations return [`Result<T, FramecryptError>`](FramecryptError) so callers
//! can branch on the failing check without inspecting message text.

use thiserror::Error;

/// The error type for all container operations.
///
/// Every variant is terminal for the operation that produced it: the engine never
/// retries, never recovers partially, and never swallows a failure during decode.
#[derive(Error, Debug)]
pub enum FramecryptError {
    /// I/O error occurred while opening, reading or writing a handle.
    ///
    /// This variant wraps [`std::io::Error`] and is automatically created
    /// when I/O operations fail (e.g., file not found, permission denied).
    /// Failures of the operating-system random source are reported here as well.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The container failed one of its consistency checks.
    ///
    /// Tampering and a wrong password both land here: decrypting with the wrong key
    /// garbles the format tag, the digest or the padding, and the engine does not try
    /// to tell these cases apart.
    #[error("corrupted container: {0}")]
    CorruptedContainer(Corruption),

    /// The number of plaintext bytes produced differs from the length declared in the frame.
    #[error("size mismatch: frame declares {declared} bytes, {actual} bytes were produced")]
    SizeMismatch {
        /// Length recorded in the frame (or measured from the source on encrypt).
        declared: u64,
        /// Bytes actually streamed.
        actual: u64,
    },

    /// The configured cancel flag was raised between two chunks.
    #[error("operation cancelled")]
    Cancelled,

    /// [`FrameDecoder::step`](crate::FrameDecoder::step) was called again after it had
    /// already returned an error.
    #[error("decoder already failed")]
    DecoderFailed,
}

/// Which container check failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corruption {
    /// The decrypted format tag does not match the configured one.
    #[error("format tag mismatch")]
    FormatTag,

    /// The trailing SHA-256 digest does not match the decrypted payload.
    #[error("integrity digest mismatch")]
    Digest,

    /// The container ends before a complete header, block or digest could be read.
    #[error("container is truncated")]
    Truncated,

    /// The final cipher block does not carry valid PKCS#7 padding.
    #[error("invalid PKCS#7 padding")]
    Padding,

    /// Plaintext remains after the integrity digest.
    #[error("unexpected data after integrity digest")]
    TrailingData,

    /// The frame declares a negative plaintext length.
    #[error("invalid plaintext length in frame")]
    InvalidLength,
}

impl From<Corruption> for FramecryptError {
    fn from(kind: Corruption) -> Self {
        FramecryptError::CorruptedContainer(kind)
    }
}

impl FramecryptError {
    /// Returns the failed check if this is a [`FramecryptError::CorruptedContainer`].
    #[must_use]
    pub fn corruption(&self) -> Option<Corruption> {
        match self {
            FramecryptError::CorruptedContainer(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Maps an unexpected EOF while reading container bytes to [`Corruption::Truncated`].
    ///
    /// Any other I/O failure stays an [`FramecryptError::Io`].
    pub(crate) fn from_container_read(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Corruption::Truncated.into()
        } else {
            FramecryptError::Io(err)
        }
    }
}
