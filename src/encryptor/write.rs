//! src/encryptor/write.rs
//! Frame write helpers: every field goes through the caller's writer

use crate::aliases::Digest32;
use crate::error::FramecryptError;
use crate::header::FramePrefix;
use std::io::Write;

#[inline]
pub fn write_octets<W: Write>(writer: &mut W, data: &[u8]) -> Result<(), FramecryptError> {
    writer.write_all(data).map_err(FramecryptError::Io)
}

#[inline]
pub fn write_frame_prefix<W: Write>(
    writer: &mut W,
    prefix: &FramePrefix,
) -> Result<(), FramecryptError> {
    write_octets(writer, &prefix.to_bytes())
}

#[inline]
pub fn write_digest<W: Write>(writer: &mut W, digest: &Digest32) -> Result<(), FramecryptError> {
    write_octets(writer, &digest[..])
}
