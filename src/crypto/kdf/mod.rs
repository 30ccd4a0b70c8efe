//! # Key Derivation
//!
//! Turns a password and the container salt into the AES-256 session key.
//!
//! - [`pbkdf2`] - PBKDF2-HMAC-SHA256, fixed 1000 iterations
//!
//! The high-level [`encrypt`](crate::encrypt) and [`decrypt`](crate::decrypt) functions
//! call this automatically; it is public for custom flows that read the header themselves.

pub mod pbkdf2;

pub use self::pbkdf2::derive_key;
