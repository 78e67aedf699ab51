use std::sync::atomic::AtomicBool;

use serde::{Deserialize, Serialize};

use crate::analysis::spectrum::aggregate;
use crate::engine::Tuning;
use crate::error::{Error, Result};
use crate::formant::PadPoint;
use crate::MIN_CLIP_SECS;

/// Spectral fingerprint of a voice clip: a candidate pad point plus the raw
/// measures it was derived from.
///
/// Display-only by contract — a fingerprint never drives the hardware until
/// the user explicitly snaps the pad to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub pad: PadPoint,
    /// Energy-weighted mean frequency of the clip.
    pub centroid_hz: f32,
    /// log10 of head-band over chest-band energy.
    pub balance_log: f32,
    /// RMS amplitude of the raw clip.
    pub rms: f32,
    pub sample_rate: u32,
    /// [0, 1]; silent or degenerate audio scores near zero.
    pub confidence: f32,
}

impl Fingerprint {
    pub fn is_confident(&self) -> bool {
        self.confidence >= 0.5
    }
}

/// Map a value from `[lo, hi]` onto `[-1, 1]`, clamped.
fn to_pad_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return 0.0;
    }
    (2.0 * (value - lo) / (hi - lo) - 1.0).clamp(-1.0, 1.0)
}

/// Reduce a mono clip to a [`Fingerprint`].
///
/// Fails with [`Error::EmptySignal`] below the 50 ms minimum and with
/// [`Error::UnsupportedFormat`] for a zero sample rate; everything else —
/// including silence — succeeds with a low confidence score.
pub fn analyze(samples: &[f32], sample_rate: u32, tuning: &Tuning) -> Result<Fingerprint> {
    analyze_cancellable(samples, sample_rate, tuning, None)
}

pub(crate) fn analyze_cancellable(
    samples: &[f32],
    sample_rate: u32,
    tuning: &Tuning,
    cancel: Option<&AtomicBool>,
) -> Result<Fingerprint> {
    if sample_rate == 0 {
        return Err(Error::UnsupportedFormat("sample rate of 0 Hz".into()));
    }
    let got_ms = samples.len() as f32 / sample_rate as f32 * 1_000.0;
    let min_ms = MIN_CLIP_SECS * 1_000.0;
    if got_ms < min_ms {
        return Err(Error::EmptySignal { got_ms, min_ms });
    }

    let spectrum = aggregate(samples, sample_rate, cancel)?;

    let centroid_hz = spectrum.centroid_hz();
    let chest = spectrum.band_energy(tuning.chest_band_lo_hz, tuning.chest_band_hi_hz);
    let head = spectrum.band_energy(tuning.head_band_lo_hz, tuning.head_band_hi_hz);
    // Epsilon keeps the ratio finite for silent bands.
    let balance_log = ((head + 1e-12) / (chest + 1e-12)).log10();

    let x = to_pad_axis(centroid_hz, tuning.centroid_lo_hz, tuning.centroid_hi_hz);
    let y = to_pad_axis(balance_log, tuning.balance_log_lo, tuning.balance_log_hi);

    let rms = if samples.is_empty() {
        0.0
    } else {
        (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
    };
    let confidence = if centroid_hz > 0.0 {
        (rms / tuning.confidence_rms_ref).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Ok(Fingerprint {
        pad: PadPoint::clamped(x, y),
        centroid_hz,
        balance_log,
        rms,
        sample_rate,
        confidence,
    })
}
