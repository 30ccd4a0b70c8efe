//! Utility functions used across the library.

use subtle::ConstantTimeEq;

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// Used by both CBC directions: plaintext with the previous ciphertext on encrypt,
/// decrypted block with the previous ciphertext on decrypt.
///
/// # Panics (by contract)
///
/// Panics if any of the three slices is shorter than 16 bytes. All callers pass
/// [`Block16`](crate::aliases::Block16) contents, so this never happens in practice.
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < 16 {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// Constant-time slice equality. Slices of different length compare unequal.
#[inline]
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}
