//! Container decryption.
//!
//! Core API: [`decrypt`]. For step-by-step control (progress reporting, tests of
//! individual transitions) drive a [`FrameDecoder`] directly.

pub(crate) mod decrypt;
pub(crate) mod read;
pub(crate) mod state;

pub use decrypt::decrypt;
pub use read::{read_digest, read_exact_span, read_frame_prefix};
pub use state::{DecodeState, FrameDecoder};
