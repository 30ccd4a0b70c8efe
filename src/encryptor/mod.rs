//! Container encryption.
//!
//! Core API: [`encrypt`] for seekable sources, [`encrypt_sized`] when the length is
//! known up front. [`encrypt_with_fixed_header`] is the deterministic variant.

pub(crate) mod encrypt;
pub(crate) mod stream;
pub(crate) mod write;

pub use encrypt::{encrypt, encrypt_sized, encrypt_with_fixed_header};
pub use stream::encrypt_payload;
pub use write::{write_digest, write_frame_prefix, write_octets};
