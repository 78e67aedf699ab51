//! Spectral fingerprint extraction.
//!
//! A recorded voice clip is reduced to a single pad point: brightness from
//! the spectral centroid, chest/head balance from the low/high band energy
//! ratio. This is deliberately a coarse fingerprint — true formant/LPC
//! detection is future work.

/// Fingerprint derivation from an aggregate spectrum.
pub mod fingerprint;
/// Framed, windowed FFT aggregation.
pub mod spectrum;
/// Cancellable background analysis.
pub mod task;

pub use fingerprint::{analyze, Fingerprint};
pub use spectrum::AggregateSpectrum;
pub use task::AnalysisTask;
