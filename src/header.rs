//! # Container Header and Frame Prefix
//!
//! Layout of a container:
//!
//! ```text
//! [ 16 bytes  IV                                     ]  \ unencrypted header
//! [ 16 bytes  salt                                   ]  /
//! [ AES-256-CBC ciphertext of:                       ]
//!     [  8 bytes  plaintext length, i64 little-endian ]  \ frame prefix
//!     [  8 bytes  format tag,       u64 little-endian ]  /
//!     [  N bytes  payload                             ]
//!     [ 32 bytes  SHA-256 of payload                  ]
//! ```
//!
//! The chunk size used to stream the payload is not recorded anywhere.

use crate::aliases::{Iv16, Salt16};
use crate::consts::{BLOCK_SIZE, DIGEST_SIZE, FRAME_PREFIX_SIZE, HEADER_SIZE, IV_SIZE, SALT_SIZE};
use crate::crypto::rng::SecureRandomExt;
use crate::error::{Corruption, FramecryptError};
use std::io::{Read, Write};

/// Unencrypted container prefix: the CBC IV and the KDF salt.
///
/// Generated fresh for every encryption and never stored anywhere but the container.
#[derive(Clone, Debug)]
pub struct EncryptionHeader {
    iv: Iv16,
    salt: Salt16,
}

impl EncryptionHeader {
    /// Fresh random IV and salt from the OS CSPRNG.
    pub fn generate() -> Result<Self, FramecryptError> {
        Ok(Self {
            iv: Iv16::random()?,
            salt: Salt16::random()?,
        })
    }

    /// Build a header from known values (deterministic encryption, tests).
    #[must_use]
    pub fn from_parts(iv: [u8; IV_SIZE], salt: [u8; SALT_SIZE]) -> Self {
        Self {
            iv: Iv16::new(iv),
            salt: Salt16::new(salt),
        }
    }

    #[must_use]
    pub fn iv(&self) -> &Iv16 {
        &self.iv
    }

    #[must_use]
    pub fn salt(&self) -> &Salt16 {
        &self.salt
    }

    /// The 32 header bytes exactly as they appear on disk.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[..IV_SIZE].copy_from_slice(&self.iv[..]);
        out[IV_SIZE..].copy_from_slice(&self.salt[..]);
        out
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), FramecryptError> {
        writer.write_all(&self.iv[..])?;
        writer.write_all(&self.salt[..])?;
        Ok(())
    }

    /// Read the 32-byte header. A short source is [`Corruption::Truncated`].
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, FramecryptError> {
        let mut iv = Iv16::new([0u8; IV_SIZE]);
        let mut salt = Salt16::new([0u8; SALT_SIZE]);
        reader
            .read_exact(&mut iv[..])
            .map_err(FramecryptError::from_container_read)?;
        reader
            .read_exact(&mut salt[..])
            .map_err(FramecryptError::from_container_read)?;
        Ok(Self { iv, salt })
    }
}

/// Read the unencrypted header of a container without a password.
///
/// Useful for inspection tools; the IV and salt are public by construction.
///
/// # Example
///
/// ```
/// use framecrypt::read_header;
/// use std::io::Cursor;
///
/// let mut bytes = vec![0xAAu8; 16];
/// bytes.extend_from_slice(&[0xBBu8; 16]);
///
/// let header = read_header(Cursor::new(bytes))?;
/// assert_eq!(**header.iv(), [0xAA; 16]);
/// assert_eq!(**header.salt(), [0xBB; 16]);
/// # Ok::<(), framecrypt::FramecryptError>(())
/// ```
pub fn read_header<R: Read>(mut reader: R) -> Result<EncryptionHeader, FramecryptError> {
    EncryptionHeader::read_from(&mut reader)
}

/// The two fields written through the cipher before the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramePrefix {
    pub plaintext_len: i64,
    pub format_tag: u64,
}

impl FramePrefix {
    #[must_use]
    pub fn to_bytes(&self) -> [u8; FRAME_PREFIX_SIZE] {
        let mut out = [0u8; FRAME_PREFIX_SIZE];
        out[..8].copy_from_slice(&self.plaintext_len.to_le_bytes());
        out[8..].copy_from_slice(&self.format_tag.to_le_bytes());
        out
    }

    #[must_use]
    pub fn from_bytes(bytes: &[u8; FRAME_PREFIX_SIZE]) -> Self {
        let mut len = [0u8; 8];
        let mut tag = [0u8; 8];
        len.copy_from_slice(&bytes[..8]);
        tag.copy_from_slice(&bytes[8..]);
        Self {
            plaintext_len: i64::from_le_bytes(len),
            format_tag: u64::from_le_bytes(tag),
        }
    }

    /// Check the tag against the configured one and return the declared length.
    ///
    /// The tag is checked first: with a wrong key both fields are noise, and a tag
    /// mismatch is the clearest report.
    pub fn validate(&self, expected_tag: u64) -> Result<u64, FramecryptError> {
        if self.format_tag != expected_tag {
            return Err(Corruption::FormatTag.into());
        }
        u64::try_from(self.plaintext_len).map_err(|_| Corruption::InvalidLength.into())
    }
}

/// Exact container size for a plaintext of `plaintext_len` bytes.
#[must_use]
pub const fn encrypted_len(plaintext_len: u64) -> u64 {
    let framed = (FRAME_PREFIX_SIZE + DIGEST_SIZE) as u64 + plaintext_len;
    let block = BLOCK_SIZE as u64;
    HEADER_SIZE as u64 + (framed / block + 1) * block
}
