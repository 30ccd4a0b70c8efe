//! tests/common.rs
//! Common constants and utilities shared across test files

use framecrypt::{EngineConfig, PasswordString};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Standard test password used across test files
#[allow(dead_code)] // Used across multiple test files
pub const TEST_PASSWORD: &str = "Hello";

/// Format tag used by tests that don't care about the tag value
#[allow(dead_code)]
pub const TEST_FORMAT_TAG: u64 = 0x5445_5354_5441_4721;

/// Sizes around the AES block and the frame layout: empty, sub-block, exact block,
/// one past, and multi-block.
#[allow(dead_code)]
pub const BOUNDARY_SIZES: &[usize] = &[0, 1, 15, 16, 17, 31, 32, 33, 47, 48, 49, 1000, 4096, 4097];

#[allow(dead_code)]
pub fn password() -> PasswordString {
    PasswordString::from(TEST_PASSWORD.to_string())
}

#[allow(dead_code)]
pub fn config() -> EngineConfig {
    EngineConfig::new(TEST_FORMAT_TAG)
}

/// Deterministic pseudo-random bytes, so failures reproduce.
#[allow(dead_code)]
pub fn pseudo_random(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = vec![0u8; len];
    rng.fill_bytes(&mut out);
    out
}

/// Route `tracing` output to the test harness. `RUST_LOG=framecrypt=trace` shows
/// every decode step.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Encrypt an in-memory buffer with the shared test config.
#[allow(dead_code)]
pub fn seal(plaintext: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    framecrypt::encrypt(std::io::Cursor::new(plaintext), &mut out, &password(), &config())
        .expect("encrypt");
    out
}

/// Decrypt an in-memory container with the shared test config.
#[allow(dead_code)]
pub fn open(container: &[u8]) -> Result<Vec<u8>, framecrypt::FramecryptError> {
    let mut out = Vec::new();
    framecrypt::decrypt(std::io::Cursor::new(container), &mut out, &password(), &config())?;
    Ok(out)
}
