//! src/config.rs
//! Engine configuration: format tag, chunk size, optional cancel flag

use crate::consts::{DEFAULT_CHUNK_SIZE, DEFAULT_FORMAT_TAG};
use crate::error::FramecryptError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Per-engine constants, fixed once built.
///
/// Defaults: [`DEFAULT_FORMAT_TAG`] and [`DEFAULT_CHUNK_SIZE`] (128 KiB), no cancel flag.
///
/// The format tag must match between the engine that encrypts a container and the one
/// that decrypts it. The chunk size is free to differ: it only affects buffer size.
///
/// # Thread Safety
///
/// This type is **thread-safe** (`Send + Sync`) and cheap to clone. Engines built from
/// clones share nothing except the optional cancel flag.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    format_tag: u64,
    chunk_size: usize,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl EngineConfig {
    /// Configuration for a container family identified by `format_tag`.
    #[must_use]
    pub fn new(format_tag: u64) -> Self {
        Self {
            format_tag,
            chunk_size: DEFAULT_CHUNK_SIZE,
            cancel_flag: None,
        }
    }

    /// Set the streaming chunk size in bytes.
    ///
    /// The chunk size must be positive; `0` is clamped to `1` rather than rejected,
    /// since it only affects buffer size and never the container format.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Poll `flag` at every chunk boundary; once it reads `true` the running
    /// operation stops with [`FramecryptError::Cancelled`].
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    #[must_use]
    pub const fn format_tag(&self) -> u64 {
        self.format_tag
    }

    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    #[inline]
    pub(crate) fn check_cancelled(&self) -> Result<(), FramecryptError> {
        match &self.cancel_flag {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(FramecryptError::Cancelled),
            _ => Ok(()),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT_TAG)
    }
}
