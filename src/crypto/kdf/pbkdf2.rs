//! src/crypto/kdf/pbkdf2.rs

use crate::aliases::{Aes256Key32, PasswordString, Salt16};
use crate::consts::KDF_ITERATIONS;

use hmac::Hmac;
use pbkdf2::pbkdf2;
use secrecy::ExposeSecret;
use sha2::Sha256;

/// Derive the 32-byte session key from `password` and the container salt.
///
/// PBKDF2-HMAC-SHA256 with [`KDF_ITERATIONS`] rounds. Deterministic: the decrypt path
/// re-derives the same key from the salt stored in the header.
///
/// # Compatibility
/// This is standard PBKDF2, not the legacy PBKDF1-style `PasswordDeriveBytes`
/// derivation. Containers written by tools using that scheme do not decrypt here,
/// and the reverse is also true, even with the same password and salt.
///
/// # Security
/// - Output buffer is zeroized on drop
/// - The key itself is never written to the container, only the salt
#[inline]
#[must_use]
pub fn derive_key(password: &PasswordString, salt: &Salt16) -> Aes256Key32 {
    let mut key = Aes256Key32::new([0u8; 32]);
    derive_pbkdf2_sha256(
        password.expose_secret().as_bytes(),
        &salt[..],
        KDF_ITERATIONS,
        &mut key[..],
    );
    key
}

/// Raw PBKDF2-HMAC-SHA256 into a caller buffer of any length.
#[inline(always)]
pub(crate) fn derive_pbkdf2_sha256(password: &[u8], salt: &[u8], iterations: u32, out: &mut [u8]) {
    pbkdf2::<Hmac<Sha256>>(password, salt, iterations, out)
        .expect("HMAC-SHA256 accepts keys of any length");
}
