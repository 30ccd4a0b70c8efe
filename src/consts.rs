//! # Constants
//!
//! This module defines the container layout sizes, key-derivation parameters
//! and engine defaults used throughout the library.

/// Default format tag, the tag of containers written without an explicit configuration.
///
/// Any `u64` works as long as encryptor and decryptor agree on it.
pub const DEFAULT_FORMAT_TAG: u64 = 0xFC01_0203_0405_06CF;

/// Default streaming chunk size (128 KiB).
///
/// A tuning parameter only: it never appears in the container.
pub const DEFAULT_CHUNK_SIZE: usize = 128 * 1024;

/// PBKDF2-HMAC-SHA256 iteration count.
///
/// Part of the format: changing it makes every existing container undecryptable.
pub const KDF_ITERATIONS: u32 = 1000;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES-256 key length in bytes.
pub const KEY_SIZE: usize = 32;

/// CBC initialization vector length in bytes.
pub const IV_SIZE: usize = 16;

/// KDF salt length in bytes.
pub const SALT_SIZE: usize = 16;

/// Unencrypted header length: IV followed by salt.
pub const HEADER_SIZE: usize = IV_SIZE + SALT_SIZE;

/// Encrypted frame prefix length: `i64` plaintext length + `u64` format tag.
pub const FRAME_PREFIX_SIZE: usize = 16;

/// SHA-256 integrity tag length in bytes.
pub const DIGEST_SIZE: usize = 32;
