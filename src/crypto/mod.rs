//! Low-level primitives: key derivation, the CBC transforms, the payload digest and
//! OS randomness.

pub mod cipher;
pub mod digest;
pub mod kdf;
pub mod rng;
