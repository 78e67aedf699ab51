//! Pad interpolation engine.
//!
//! [`compute`] is the pure heart of the crate: it turns a pad point, a voice
//! profile, the captured base preset, and the two intensity sliders into a
//! fresh [`FormantVector`]. The same blend runs for every formant band —
//! there is no per-band special casing — and all shaping constants live in
//! [`Tuning`] so they can be recalibrated against real hardware without
//! touching code.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::formant::{FormantVector, PadPoint, VoiceProfile, LEVEL_MAX, RES_MAX, RES_MIN};
use crate::FORMANT_BANDS;

/// Tunable shaping and analysis constants.
///
/// Defaults are calibration guesses, not derived values: adjust them against
/// the instrument (or a reference recording) and load overrides from TOML.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Scale of the brightness tilt applied to frequencies per unit of
    /// pad x, at full brightness-slider intensity.
    pub brightness_scale: f32,
    /// Fraction of level removed at full positive resonance slider
    /// (the slider expresses harshness-reduction intent).
    pub resonance_reduction: f32,

    /// Spectral centroid mapped linearly from this span onto pad x [-1, 1].
    pub centroid_lo_hz: f32,
    pub centroid_hi_hz: f32,
    /// Chest register band for the head/chest balance measure.
    pub chest_band_lo_hz: f32,
    pub chest_band_hi_hz: f32,
    /// Head register band for the head/chest balance measure.
    pub head_band_lo_hz: f32,
    pub head_band_hi_hz: f32,
    /// log10(head/chest) energy ratio mapped linearly from this span onto
    /// pad y [-1, 1].
    pub balance_log_lo: f32,
    pub balance_log_hi: f32,
    /// RMS at which a fingerprint reaches full confidence.
    pub confidence_rms_ref: f32,

    /// Minimum gap between outbound knob dispatches, in milliseconds.
    /// The serial link accepts one parameter at a time; flooding it while
    /// dragging the pad starves the instrument.
    pub update_interval_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            brightness_scale: 0.25,
            resonance_reduction: 0.5,
            centroid_lo_hz: 1500.0,
            centroid_hi_hz: 4000.0,
            chest_band_lo_hz: 100.0,
            chest_band_hi_hz: 800.0,
            head_band_lo_hz: 2000.0,
            head_band_hi_hz: 5000.0,
            balance_log_lo: -2.0,
            balance_log_hi: 0.5,
            confidence_rms_ref: 0.05,
            update_interval_ms: 150,
        }
    }
}

impl Tuning {
    /// Parse overrides from a TOML document; absent keys keep defaults.
    pub fn from_toml_str(doc: &str) -> Result<Self> {
        Ok(toml::from_str(doc)?)
    }
}

/// Blend base preset, profile canon, and slider shaping into a processed
/// formant vector.
///
/// Per band i (identically for all four):
///   `F = base.F*(1-wy) + prof.F*wy`, then `F *= 1 + brightness_scale*x*b`
///   `L` blends the same way, then `L *= 1 - resonance_reduction*max(0, r)`
///   `R` blends the same way, then clamps into `[RES_MIN, RES_MAX]`
/// where `wy = |pad.y|` (chest/head morph weight), `b` is the brightness
/// slider, and `r` the resonance slider. The sliders are clamped to [-1, 1];
/// brightness 0 disables the tilt entirely, so the pad-origin fixed point
/// reproduces the base preset exactly.
///
/// Fails with [`Error::MissingBase`] when no base has been captured — the
/// blend is base-relative even at the pad origin, and silently substituting
/// values would send unintended knobs to the hardware.
pub fn compute(
    base: Option<&FormantVector>,
    pad: PadPoint,
    profile: &VoiceProfile,
    brightness: f32,
    resonance: f32,
    tuning: &Tuning,
) -> Result<FormantVector> {
    let base = base.ok_or(Error::MissingBase)?;
    let brightness = brightness.clamp(-1.0, 1.0);
    let resonance = resonance.clamp(-1.0, 1.0);

    let wy = pad.y().abs().min(1.0);
    let tilt = 1.0 + tuning.brightness_scale * pad.x() * brightness;
    let cut = 1.0 - tuning.resonance_reduction * resonance.max(0.0);

    let mut freqs = [0.0f32; FORMANT_BANDS];
    let mut levels = [0.0f32; FORMANT_BANDS];
    let mut resonances = [0.0f32; FORMANT_BANDS];
    for band in 0..FORMANT_BANDS {
        let blend = |b: f32, p: f32| b * (1.0 - wy) + p * wy;

        let f = blend(base.freqs[band], profile.canonical.freqs[band]);
        freqs[band] = (f * tilt).max(0.0);

        let l = blend(base.levels[band], profile.canonical.levels[band]);
        levels[band] = (l * cut).clamp(0.0, LEVEL_MAX);

        let r = blend(base.resonances[band], profile.canonical.resonances[band]);
        resonances[band] = r.clamp(RES_MIN, RES_MAX);
    }

    Ok(FormantVector::new(freqs, levels, resonances))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formant::profile::{by_name, VoiceName};

    fn base() -> FormantVector {
        FormantVector::new(
            [500.0, 1500.0, 2500.0, 3500.0],
            [50.0, 40.0, 28.0, 20.0],
            [3.0, 3.0, 5.0, 5.0],
        )
    }

    #[test]
    fn identical_inputs_yield_bit_identical_vectors() {
        let tuning = Tuning::default();
        let pad = PadPoint::new(0.37, -0.61).unwrap();
        let profile = by_name(VoiceName::Alto);
        let a = compute(Some(&base()), pad, profile, 0.4, -0.2, &tuning).unwrap();
        let b = compute(Some(&base()), pad, profile, 0.4, -0.2, &tuning).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_base_fails_even_at_the_origin() {
        let tuning = Tuning::default();
        let profile = by_name(VoiceName::Neutral);
        let err = compute(None, PadPoint::ORIGIN, profile, 0.0, 0.0, &tuning).unwrap_err();
        assert!(matches!(err, Error::MissingBase));
    }

    #[test]
    fn origin_with_neutral_sliders_reproduces_the_base() {
        let tuning = Tuning::default();
        let profile = by_name(VoiceName::Tenor);
        let b = base();
        let out = compute(Some(&b), PadPoint::ORIGIN, profile, 0.0, 0.0, &tuning).unwrap();
        assert_eq!(out, b);
    }

    #[test]
    fn full_head_pad_lands_on_the_profile_canon() {
        // pad (1,1), brightness slider 0: wy = 1 wipes the base contribution
        // and the zero slider disables the x tilt.
        let tuning = Tuning::default();
        let profile = by_name(VoiceName::Tenor);
        let pad = PadPoint::new(1.0, 1.0).unwrap();
        let out = compute(Some(&base()), pad, profile, 0.0, 0.0, &tuning).unwrap();
        assert_eq!(out.freqs, profile.canonical.freqs);
        assert_eq!(out.levels, profile.canonical.levels);
        assert_eq!(out.resonances, profile.canonical.resonances);
    }

    #[test]
    fn blend_is_uniform_across_bands() {
        // Perturbing the base at one band must shift the output at exactly
        // that band, by the same amount regardless of which band it is.
        let tuning = Tuning::default();
        let profile = by_name(VoiceName::Mezzo);
        let pad = PadPoint::new(0.0, 0.5).unwrap();
        let reference = compute(Some(&base()), pad, profile, 0.0, 0.0, &tuning).unwrap();

        let mut deltas = Vec::new();
        for band in 0..FORMANT_BANDS {
            let mut b = base();
            b.freqs[band] += 100.0;
            let out = compute(Some(&b), pad, profile, 0.0, 0.0, &tuning).unwrap();
            for other in 0..FORMANT_BANDS {
                if other != band {
                    assert_eq!(
                        out.freqs[other], reference.freqs[other],
                        "band {band} perturbation leaked into band {other}"
                    );
                }
            }
            deltas.push(out.freqs[band] - reference.freqs[band]);
        }
        for pair in deltas.windows(2) {
            assert!(
                (pair[0] - pair[1]).abs() < 1e-3,
                "bands respond unequally: {deltas:?}"
            );
        }
    }

    #[test]
    fn brightness_tilts_frequencies_with_pad_x() {
        let tuning = Tuning::default();
        let profile = by_name(VoiceName::Neutral);
        let bright = PadPoint::new(1.0, 0.0).unwrap();
        let dark = PadPoint::new(-1.0, 0.0).unwrap();
        let up = compute(Some(&base()), bright, profile, 1.0, 0.0, &tuning).unwrap();
        let down = compute(Some(&base()), dark, profile, 1.0, 0.0, &tuning).unwrap();
        for band in 0..FORMANT_BANDS {
            assert!(up.freqs[band] > base().freqs[band]);
            assert!(down.freqs[band] < base().freqs[band]);
        }
        // Exact factor at full tilt.
        assert!((up.freqs[0] - 500.0 * 1.25).abs() < 1e-3);
    }

    #[test]
    fn positive_resonance_slider_attenuates_levels_only() {
        let tuning = Tuning::default();
        let profile = by_name(VoiceName::Neutral);
        let soft = compute(Some(&base()), PadPoint::ORIGIN, profile, 0.0, 1.0, &tuning).unwrap();
        for band in 0..FORMANT_BANDS {
            assert!((soft.levels[band] - base().levels[band] * 0.5).abs() < 1e-3);
            assert_eq!(soft.freqs[band], base().freqs[band]);
            assert_eq!(soft.resonances[band], base().resonances[band]);
        }
        // Negative slider expresses no reduction intent.
        let neutral =
            compute(Some(&base()), PadPoint::ORIGIN, profile, 0.0, -1.0, &tuning).unwrap();
        assert_eq!(neutral.levels, base().levels);
    }

    #[test]
    fn out_of_range_resonances_are_clamped_not_rejected() {
        let tuning = Tuning::default();
        let profile = by_name(VoiceName::Neutral);
        let hot = FormantVector::new(base().freqs, base().levels, [40.0, -3.0, 4.0, 4.0]);
        let out = compute(Some(&hot), PadPoint::ORIGIN, profile, 0.0, 0.0, &tuning).unwrap();
        assert_eq!(out.resonances[0], RES_MAX);
        assert_eq!(out.resonances[1], RES_MIN);
        for band in 0..FORMANT_BANDS {
            assert!(out.resonances[band] >= RES_MIN && out.resonances[band] <= RES_MAX);
        }
    }

    #[test]
    fn slider_inputs_outside_range_are_soft_clamped() {
        let tuning = Tuning::default();
        let profile = by_name(VoiceName::Neutral);
        let a = compute(Some(&base()), PadPoint::ORIGIN, profile, 5.0, 9.0, &tuning).unwrap();
        let b = compute(Some(&base()), PadPoint::ORIGIN, profile, 1.0, 1.0, &tuning).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tuning_toml_overrides_only_named_keys() {
        let t = Tuning::from_toml_str("brightness_scale = 0.5\nupdate_interval_ms = 40\n").unwrap();
        assert_eq!(t.brightness_scale, 0.5);
        assert_eq!(t.update_interval_ms, 40);
        assert_eq!(t.centroid_lo_hz, Tuning::default().centroid_lo_hz);
    }
}
