//! src/batch_ops.rs
//! Parallel container processing over rayon's global pool

use rayon::prelude::*;
use std::io::{Read, Seek, Write};

use crate::aliases::PasswordString;
use crate::config::EngineConfig;
use crate::{decrypt, encrypt, FramecryptError};

/// Encrypt every `(source, sink)` pair in parallel.
///
/// Each item gets its own IV, salt and key. Stops at the first failure; other items
/// may already have been written.
pub fn encrypt_batch<R, W>(
    batch: &mut [(R, W)],
    password: &PasswordString,
    config: &EngineConfig,
) -> Result<(), FramecryptError>
where
    R: Read + Seek + Send,
    W: Write + Send,
{
    batch
        .par_iter_mut()
        .try_for_each(|(src, dst)| encrypt(src, dst, password, config))
}

/// Decrypt every `(source, sink)` pair in parallel and return the plaintext lengths
/// in batch order.
pub fn decrypt_batch<R, W>(
    batch: &mut [(R, W)],
    password: &PasswordString,
    config: &EngineConfig,
) -> Result<Vec<u64>, FramecryptError>
where
    R: Read + Send,
    W: Write + Send,
{
    batch
        .par_iter_mut()
        .map(|(src, dst)| decrypt(src, dst, password, config))
        .collect()
}
