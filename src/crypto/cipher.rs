//! # Cipher Session
//!
//! AES-256 in CBC mode with PKCS#7 padding, exposed as two single-use transforms:
//!
//! - [`CbcEncryptor`] wraps a byte sink; everything written through it lands in the
//!   sink as ciphertext. Padding is emitted only by [`CbcEncryptor::finish`].
//! - [`CbcDecryptor`] wraps a byte source and yields plaintext. It keeps one ciphertext
//!   block of look-ahead so padding is stripped from the true final block only.
//!
//! Both are built from an immutable [`CipherParams`], so a transform can never run
//! with a half-configured key or IV. Create a fresh transform per file.

use crate::aliases::{Aes256Key32, Block16, Iv16, PasswordString};
use crate::consts::BLOCK_SIZE;
use crate::crypto::kdf::derive_key;
use crate::error::{Corruption, FramecryptError};
use crate::header::EncryptionHeader;
use crate::utils::{ct_eq, xor_blocks};
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes256Dec, Aes256Enc, Block as AesBlock};
use std::fmt;
use std::io::{self, Read, Write};

/// Symmetric-cipher configuration for one operation.
///
/// Key size 256 bits, block size 128 bits, CBC chaining, PKCS#7 padding. The
/// key and IV are fixed at construction; the value is discarded when the
/// operation completes.
pub struct CipherParams {
    key: Aes256Key32,
    iv: Iv16,
}

impl CipherParams {
    /// Key size in bits.
    pub const KEY_BITS: u32 = 256;
    /// Block size in bits.
    pub const BLOCK_BITS: u32 = 128;

    #[must_use]
    pub fn new(key: Aes256Key32, iv: Iv16) -> Self {
        Self { key, iv }
    }

    /// Derive the key from `password` and the header salt, and take the header IV.
    #[must_use]
    pub fn derive(password: &PasswordString, header: &EncryptionHeader) -> Self {
        Self::new(derive_key(password, header.salt()), header.iv().clone())
    }

    /// Start an encrypting transform over `sink`.
    pub fn encryptor<W: Write>(&self, sink: W) -> CbcEncryptor<W> {
        CbcEncryptor {
            inner: sink,
            cipher: Aes256Enc::new((&*self.key).into()),
            chain: self.iv.clone(),
            pending: Block16::new([0u8; BLOCK_SIZE]),
            pending_len: 0,
        }
    }

    /// Start a decrypting transform over `source`.
    pub fn decryptor<R: Read>(&self, source: R) -> CbcDecryptor<R> {
        CbcDecryptor {
            inner: source,
            cipher: Aes256Dec::new((&*self.key).into()),
            chain: self.iv.clone(),
            lookahead: None,
            plain: Block16::new([0u8; BLOCK_SIZE]),
            pos: 0,
            len: 0,
            exhausted: false,
        }
    }
}

impl fmt::Debug for CipherParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherParams")
            .field("key", &"[REDACTED]")
            .field("key_bits", &Self::KEY_BITS)
            .field("block_bits", &Self::BLOCK_BITS)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Encrypting transform
// ─────────────────────────────────────────────────────────────────────────────

/// AES-256-CBC encrypting writer.
///
/// Buffers at most one partial block. Dropping it without calling
/// [`finish`](Self::finish) leaves the sink without its final padded block,
/// which makes the output undecryptable.
pub struct CbcEncryptor<W: Write> {
    inner: W,
    cipher: Aes256Enc,
    chain: Block16, // previous ciphertext block (the IV before the first block)
    pending: Block16,
    pending_len: usize,
}

impl<W: Write> CbcEncryptor<W> {
    /// Encrypt the full `pending` block and send it. Chain and buffer only advance once
    /// the sink has accepted the block.
    #[inline(always)]
    fn encrypt_pending(&mut self) -> io::Result<()> {
        let mut xored = Block16::new([0u8; BLOCK_SIZE]);
        xor_blocks(&self.pending[..], &self.chain[..], &mut xored[..]);

        let mut aes_block = AesBlock::from(*xored);
        self.cipher.encrypt_block(&mut aes_block);
        self.inner.write_all(aes_block.as_slice())?;

        self.chain.copy_from_slice(aes_block.as_slice());
        self.pending_len = 0;
        Ok(())
    }

    /// Apply PKCS#7 padding, encrypt the final block, flush and hand back the sink.
    pub fn finish(mut self) -> Result<W, FramecryptError> {
        let pad = (BLOCK_SIZE - self.pending_len) as u8; // 1..=16
        let start = self.pending_len;
        self.pending[start..].fill(pad);
        self.encrypt_pending()?;
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> Write for CbcEncryptor<W> {
    /// Bytes that complete a block count as written only once that block reaches the
    /// sink. On a sink error nothing from the failing block is kept, so the caller can
    /// retry the same bytes.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut consumed = 0;
        while consumed < buf.len() {
            let start = self.pending_len;
            let take = (BLOCK_SIZE - start).min(buf.len() - consumed);
            self.pending[start..start + take].copy_from_slice(&buf[consumed..consumed + take]);

            if start + take < BLOCK_SIZE {
                self.pending_len = start + take;
            } else {
                self.pending_len = BLOCK_SIZE;
                if let Err(e) = self.encrypt_pending() {
                    self.pending_len = start;
                    return if consumed == 0 { Err(e) } else { Ok(consumed) };
                }
            }
            consumed += take;
        }
        Ok(consumed)
    }

    /// Flushes the sink. Does not pad: a partial block stays buffered.
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decrypting transform
// ─────────────────────────────────────────────────────────────────────────────

/// AES-256-CBC decrypting reader.
pub struct CbcDecryptor<R: Read> {
    inner: R,
    cipher: Aes256Dec,
    chain: Block16,
    lookahead: Option<Block16>,
    plain: Block16,
    pos: usize,
    len: usize,
    exhausted: bool, // final block decrypted and unpadded
}

impl<R: Read> CbcDecryptor<R> {
    /// Read one full ciphertext block; `None` on a clean EOF at a block boundary.
    fn read_cipher_block(&mut self) -> Result<Option<Block16>, FramecryptError> {
        let mut block = Block16::new([0u8; BLOCK_SIZE]);
        let mut filled = 0;
        while filled < BLOCK_SIZE {
            match self.inner.read(&mut block[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(FramecryptError::Io(e)),
            }
        }
        match filled {
            0 => Ok(None),
            BLOCK_SIZE => Ok(Some(block)),
            _ => Err(Corruption::Truncated.into()),
        }
    }

    /// Decrypt the next ciphertext block into `plain`.
    fn refill(&mut self) -> Result<(), FramecryptError> {
        let current = match self.lookahead.take() {
            Some(block) => block,
            None => self
                .read_cipher_block()?
                .ok_or(FramecryptError::from(Corruption::Truncated))?,
        };

        let mut aes_block = AesBlock::from(*current);
        self.cipher.decrypt_block(&mut aes_block);
        xor_blocks(aes_block.as_slice(), &self.chain[..], &mut self.plain[..]);
        self.chain = current;
        self.pos = 0;

        self.lookahead = self.read_cipher_block()?;
        if self.lookahead.is_none() {
            self.exhausted = true;
            self.len = strip_pkcs7(&self.plain)?;
        } else {
            self.len = BLOCK_SIZE;
        }
        Ok(())
    }

    /// Fill `buf` with plaintext; returns fewer bytes only at the logical end of the stream.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, FramecryptError> {
        let mut copied = 0;
        while copied < buf.len() {
            if self.pos == self.len {
                if self.exhausted {
                    break;
                }
                self.refill()?;
                continue;
            }
            let n = (self.len - self.pos).min(buf.len() - copied);
            buf[copied..copied + n].copy_from_slice(&self.plain[self.pos..self.pos + n]);
            self.pos += n;
            copied += n;
        }
        Ok(copied)
    }

    /// Fill `buf` completely or fail with [`Corruption::Truncated`].
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), FramecryptError> {
        if self.read(buf)? == buf.len() {
            Ok(())
        } else {
            Err(Corruption::Truncated.into())
        }
    }

    /// End the transform: the ciphertext must be fully consumed with valid padding
    /// and no plaintext may remain unread.
    pub fn finish(mut self) -> Result<R, FramecryptError> {
        loop {
            if self.pos < self.len {
                return Err(Corruption::TrailingData.into());
            }
            if self.exhausted {
                return Ok(self.inner);
            }
            self.refill()?;
        }
    }
}

/// Validate PKCS#7 padding on the final block and return the unpadded length.
#[inline]
fn strip_pkcs7(block: &Block16) -> Result<usize, FramecryptError> {
    let pad = block[BLOCK_SIZE - 1];
    if pad == 0 || pad as usize > BLOCK_SIZE {
        return Err(Corruption::Padding.into());
    }
    let start = BLOCK_SIZE - pad as usize;
    let expected = [pad; BLOCK_SIZE];
    if !ct_eq(&block[start..], &expected[start..]) {
        return Err(Corruption::Padding.into());
    }
    Ok(start)
}
