//! Secure randomness for fixed-size header values.
//!
//! Adds `T::random()` to every [`SpanBuffer`] type (`Iv16`, `Salt16`, …), drawing
//! straight from the operating-system CSPRNG. `OsRng` holds no state, so any number
//! of threads can generate headers concurrently without sharing anything.

use crate::aliases::SpanBuffer;
use crate::error::FramecryptError;
use rand::{rngs::OsRng, TryRngCore};
use std::io;

/// Extension trait – gives `.random()` to all fixed-size secure buffers
pub trait SecureRandomExt: Sized {
    /// Generate a cryptographically secure random instance of this type
    fn random() -> Result<Self, FramecryptError>;
}

/// Blanket impl – every `Zeroizing<[u8; N]>` gets `.random()`
impl<const N: usize> SecureRandomExt for SpanBuffer<N> {
    #[inline]
    fn random() -> Result<Self, FramecryptError> {
        let mut bytes = SpanBuffer::new([0u8; N]);
        OsRng
            .try_fill_bytes(&mut bytes[..])
            .map_err(|e| io::Error::other(format!("OS random source failed: {e}")))?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::{Iv16, Salt16};

    #[test]
    fn consecutive_values_differ() {
        let a = Iv16::random().unwrap();
        let b = Iv16::random().unwrap();
        assert_ne!(*a, *b);
    }

    #[test]
    fn works_from_many_threads() {
        let salts: Vec<[u8; 16]> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| *Salt16::random().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for (i, a) in salts.iter().enumerate() {
            for b in &salts[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
