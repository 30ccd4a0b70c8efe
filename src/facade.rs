//! # File Facade
//!
//! [`FileCrypt`] binds one [`EngineConfig`] (format tag, chunk size, cancel flag) and
//! offers path-based and stream-based encrypt/decrypt on top of it.
//!
//! The facade holds no per-operation state, so a single instance can be shared
//! across threads and used for any number of concurrent operations.

use crate::aliases::PasswordString;
use crate::config::EngineConfig;
use crate::decryptor::decrypt;
use crate::encryptor::{encrypt, encrypt_sized};
use crate::error::FramecryptError;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct FileCrypt {
    config: EngineConfig,
}

impl FileCrypt {
    /// Facade for containers stamped with `format_tag`, default chunk size.
    #[must_use]
    pub fn new(format_tag: u64) -> Self {
        Self::with_config(EngineConfig::new(format_tag))
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Encrypt the file at `input` into a container at `output`.
    ///
    /// `output` is created or truncated. If this fails, whatever was already written
    /// stays on disk.
    pub fn encrypt_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        password: &PasswordString,
    ) -> Result<(), FramecryptError> {
        let (input, output) = (input.as_ref(), output.as_ref());
        debug!(input = %input.display(), output = %output.display(), "encrypt file");

        let source = File::open(input)?;
        let plaintext_len = source.metadata()?.len();
        let sink = File::create(output)?;

        let mut writer = BufWriter::with_capacity(self.config.chunk_size(), sink);
        encrypt_sized(
            BufReader::with_capacity(self.config.chunk_size(), source),
            plaintext_len,
            &mut writer,
            password,
            &self.config,
        )?;
        writer.flush()?;
        Ok(())
    }

    /// Decrypt the container at `input` into a file at `output` and return the
    /// plaintext length.
    ///
    /// `output` is created or truncated. On failure it may hold partial, unverified
    /// plaintext and should be discarded.
    pub fn decrypt_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        password: &PasswordString,
    ) -> Result<u64, FramecryptError> {
        let (input, output) = (input.as_ref(), output.as_ref());
        debug!(input = %input.display(), output = %output.display(), "decrypt file");

        let source = BufReader::with_capacity(self.config.chunk_size(), File::open(input)?);
        let mut writer = BufWriter::with_capacity(self.config.chunk_size(), File::create(output)?);

        let declared = decrypt(source, &mut writer, password, &self.config)?;

        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        let actual = file.metadata()?.len();
        if actual != declared {
            warn!(declared, actual, "output file length diverges from declared length");
            return Err(FramecryptError::SizeMismatch { declared, actual });
        }
        Ok(declared)
    }

    /// Stream variant of [`encrypt_file`](Self::encrypt_file).
    pub fn encrypt<R, W>(
        &self,
        input: R,
        output: W,
        password: &PasswordString,
    ) -> Result<(), FramecryptError>
    where
        R: Read + Seek,
        W: Write,
    {
        encrypt(input, output, password, &self.config)
    }

    /// Stream variant of [`decrypt_file`](Self::decrypt_file).
    pub fn decrypt<R, W>(
        &self,
        input: R,
        output: W,
        password: &PasswordString,
    ) -> Result<u64, FramecryptError>
    where
        R: Read,
        W: Write,
    {
        decrypt(input, output, password, &self.config)
    }
}
