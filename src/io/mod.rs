//! File decoding for analysis input.

/// Mono WAV decoding.
pub mod wav;

pub use wav::{read_mono_wav, Clip};
