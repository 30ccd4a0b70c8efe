//! src/decryptor/read.rs
//! Frame read helpers: stack-first, every short read is a truncated container

use crate::aliases::{Digest32, SpanBuffer};
use crate::consts::{DIGEST_SIZE, FRAME_PREFIX_SIZE};
use crate::crypto::cipher::CbcDecryptor;
use crate::error::FramecryptError;
use crate::header::FramePrefix;
use std::io::Read;

/// Read exactly `N` plaintext bytes from the decrypting transform.
#[inline(always)]
pub fn read_exact_span<R, const N: usize>(
    reader: &mut CbcDecryptor<R>,
) -> Result<SpanBuffer<N>, FramecryptError>
where
    R: Read,
{
    let mut buf = SpanBuffer::new([0u8; N]);
    reader.read_exact(&mut buf[..])?;
    Ok(buf)
}

/// Read the 16-byte length + format tag prefix.
#[inline]
pub fn read_frame_prefix<R: Read>(
    reader: &mut CbcDecryptor<R>,
) -> Result<FramePrefix, FramecryptError> {
    let bytes = read_exact_span::<_, FRAME_PREFIX_SIZE>(reader)?;
    Ok(FramePrefix::from_bytes(&bytes))
}

/// Read the stored 32-byte integrity tag.
#[inline]
pub fn read_digest<R: Read>(reader: &mut CbcDecryptor<R>) -> Result<Digest32, FramecryptError> {
    read_exact_span::<_, DIGEST_SIZE>(reader)
}
