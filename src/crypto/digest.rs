//! Running SHA-256 over the payload.
//!
//! The verifier sees exactly the plaintext payload bytes, in order, on both the
//! encode and the decode path. It never sees the frame prefix or its own output.

use crate::aliases::Digest32;
use crate::error::{Corruption, FramecryptError};
use crate::utils::ct_eq;
use sha2::{Digest, Sha256};

/// Incremental payload hash that produces the container's trailing integrity tag.
#[derive(Clone, Default)]
pub struct IntegrityVerifier {
    hasher: Sha256,
    observed: u64,
}

impl IntegrityVerifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next run of payload bytes.
    #[inline]
    pub fn observe(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
        self.observed += bytes.len() as u64;
    }

    /// Number of payload bytes seen so far.
    #[must_use]
    pub const fn observed(&self) -> u64 {
        self.observed
    }

    /// Consume the accumulator and return the 32-byte digest.
    #[must_use]
    pub fn finalize(self) -> Digest32 {
        Digest32::new(self.hasher.finalize().into())
    }

    /// Compare the accumulated digest against the tag stored in the container.
    ///
    /// Constant-time; a stored tag of the wrong length is a mismatch.
    pub fn verify(self, stored: &[u8]) -> Result<(), FramecryptError> {
        let computed = self.finalize();
        if ct_eq(&computed[..], stored) {
            Ok(())
        } else {
            Err(Corruption::Digest.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_answers() {
        assert_eq!(
            hex::encode(*IntegrityVerifier::new().finalize()),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        let mut v = IntegrityVerifier::new();
        v.observe(b"abc");
        assert_eq!(
            hex::encode(*v.finalize()),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn chunking_does_not_change_the_digest() {
        let data: Vec<u8> = (0..1000u32).map(|i| (i * 7) as u8).collect();

        let mut whole = IntegrityVerifier::new();
        whole.observe(&data);

        let mut pieces = IntegrityVerifier::new();
        for chunk in data.chunks(33) {
            pieces.observe(chunk);
        }

        assert_eq!(pieces.observed(), 1000);
        assert_eq!(*whole.finalize(), *pieces.finalize());
    }

    #[test]
    fn verify_detects_mismatch_and_wrong_length() {
        let mut v = IntegrityVerifier::new();
        v.observe(b"payload");
        let good = v.clone().finalize();

        assert!(v.clone().verify(&good[..]).is_ok());

        let mut bad = *good;
        bad[31] ^= 1;
        let err = v.clone().verify(&bad).unwrap_err();
        assert_eq!(err.corruption(), Some(Corruption::Digest));

        let err = v.verify(&good[..31]).unwrap_err();
        assert_eq!(err.corruption(), Some(Corruption::Digest));
    }
}
