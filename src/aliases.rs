//! # Secure Type Aliases
//!
//! Type aliases for secret-bearing buffers. Every fixed-size buffer is a
//! [`zeroize::Zeroizing`] array, wiped on drop; the password is a
//! [`secrecy::SecretString`], which must be exposed explicitly.
//!
//! ## Type Categories
//!
//! ### Generic Secure Buffers
//! - [`SpanBuffer<N>`] - stack buffer of any size `N`
//! - [`ChunkBuffer`] - heap buffer used for chunked streaming
//!
//! ### Semantic Fixed-Size Types
//! - [`Aes256Key32`] - 32-byte derived session key
//! - [`Block16`] - one AES block
//! - [`Iv16`] - 16-byte CBC initialization vector
//! - [`Salt16`] - 16-byte KDF salt
//! - [`Digest32`] - 32-byte SHA-256 integrity tag
//!
//! ### Dynamic Secrets
//! - [`PasswordString`] - password wrapper

use zeroize::Zeroizing;

pub type SpanBuffer<const N: usize> = Zeroizing<[u8; N]>;

pub type Aes256Key32 = SpanBuffer<32>;
pub type Block16 = SpanBuffer<16>; // one AES block
pub type Digest32 = SpanBuffer<32>; // trailing integrity tag
pub type Iv16 = SpanBuffer<16>;
pub type Salt16 = SpanBuffer<16>;

pub type ChunkBuffer = Zeroizing<Vec<u8>>;

pub type PasswordString = secrecy::SecretString;
