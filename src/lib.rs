//! XY formant voice shaper for the D-Lev theremin.
//!
//! The crate maps a point on a 2D pad (dark↔bright, chest↔head) plus a voice
//! profile and a captured base preset onto the twelve formant knobs the
//! hardware exposes (F1–F4 frequencies, L1–L4 levels, R1–R4 resonances), and
//! derives a candidate pad point from a recorded voice clip by spectral
//! fingerprinting. Serial transmission, preset file layout, and the pad UI
//! are external collaborators reached through the traits in [`dispatch`] and
//! [`slots`].

pub mod analysis;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod formant;
pub mod io;
pub mod session;
pub mod slots;

pub use error::{Error, Result};

/// Number of formant bands the hardware exposes (F1..F4).
pub const FORMANT_BANDS: usize = 4;

/// Shortest clip the fingerprint extractor accepts, in seconds.
pub const MIN_CLIP_SECS: f32 = 0.05;
