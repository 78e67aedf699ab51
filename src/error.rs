//! Error taxonomy shared across the crate.
//!
//! Hard preconditions (missing base, bad pad coordinates, malformed WAV)
//! surface as explicit errors; out-of-range formant values from
//! interpolation are clamped instead, and low-confidence fingerprints are
//! flagged on the value rather than rejected here.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown voice profile: {0}")]
    UnknownProfile(String),

    #[error("pad coordinate ({x}, {y}) outside [-1, 1] x [-1, 1]")]
    InvalidPad { x: f32, y: f32 },

    #[error("no base preset captured; capture a base from the current slot first")]
    MissingBase,

    #[error("unsupported WAV format: {0}")]
    UnsupportedFormat(String),

    #[error("signal too short: {got_ms:.1} ms (minimum {min_ms:.1} ms)")]
    EmptySignal { got_ms: f32, min_ms: f32 },

    #[error("analysis cancelled")]
    Cancelled,

    #[error("dispatch of {param} failed: {reason}")]
    DispatchFailure { param: &'static str, reason: String },

    #[error("no preset stored in slot {0}")]
    EmptySlot(u16),

    #[error("WAV read error: {0}")]
    Wav(#[from] hound::Error),

    #[error("tuning config error: {0}")]
    Config(#[from] toml::de::Error),
}
