//! Core value types for the formant model.
//!
//! These types are plain immutable values so every computation produces a
//! new vector instead of mutating in place, which keeps the interpolation
//! engine pure and bit-deterministic.

/// Pad coordinate on the dark↔bright / chest↔head plane.
pub mod pad;
/// Static per-voice-type reference formant tables.
pub mod profile;
/// The twelve-field formant parameter vector.
pub mod vector;

pub use pad::PadPoint;
pub use profile::{profiles, VoiceName, VoiceProfile};
pub use vector::{FieldKind, FormantField, FormantVector, LEVEL_MAX, RES_MAX, RES_MIN};
