// src/lib.rs

pub mod aliases;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod encryptor;
pub mod error;
pub mod facade;
pub mod header;
pub mod utils;

// High-level API
pub use decryptor::decrypt;
pub use encryptor::{encrypt, encrypt_sized, encrypt_with_fixed_header};
pub use facade::FileCrypt;

pub use aliases::PasswordString;
pub use config::EngineConfig;
pub use error::{Corruption, FramecryptError};

// Low-level pieces for custom flows: key derivation, header inspection, stepwise decoding
pub use crypto::cipher::{CbcDecryptor, CbcEncryptor, CipherParams};
pub use crypto::digest::IntegrityVerifier;
pub use crypto::kdf::derive_key;
pub use decryptor::{DecodeState, FrameDecoder};
pub use header::{encrypted_len, read_header, EncryptionHeader, FramePrefix};

#[cfg(feature = "batch-ops")]
pub use batch_ops::{decrypt_batch, encrypt_batch};
