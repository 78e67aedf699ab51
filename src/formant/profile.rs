//! Static per-voice-type reference formant tables.
//!
//! Frequency ranges are rough typical vowel formant ranges for each voice
//! type; the canonical vector sits at the midpoint of each range. The table
//! is process-wide read-only data, initialized once on first access, and a
//! validation pass warns about (but never rejects) ordering violations —
//! real instruments break strict F1<F2<F3<F4 for special timbres.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::formant::vector::FormantVector;
use crate::FORMANT_BANDS;

/// Voice-type families, low to high, plus a neutral default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceName {
    Bass,
    Baritone,
    Tenor,
    Alto,
    Mezzo,
    Soprano,
    Neutral,
}

impl VoiceName {
    pub const ALL: [VoiceName; 7] = [
        VoiceName::Bass,
        VoiceName::Baritone,
        VoiceName::Tenor,
        VoiceName::Alto,
        VoiceName::Mezzo,
        VoiceName::Soprano,
        VoiceName::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceName::Bass => "Bass",
            VoiceName::Baritone => "Baritone",
            VoiceName::Tenor => "Tenor",
            VoiceName::Alto => "Alto",
            VoiceName::Mezzo => "Mezzo",
            VoiceName::Soprano => "Soprano",
            VoiceName::Neutral => "Neutral",
        }
    }

    /// Case-insensitive lookup, failing on anything not in the table.
    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownProfile(name.to_string()))
    }
}

/// Valid frequency span for one formant band of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormantRange {
    pub lo_hz: f32,
    pub hi_hz: f32,
}

impl FormantRange {
    fn mid(&self) -> f32 {
        0.5 * (self.lo_hz + self.hi_hz)
    }
}

/// A named voice family with its canonical formant vector and per-band
/// frequency ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub name: VoiceName,
    pub canonical: FormantVector,
    pub freq_ranges: [FormantRange; FORMANT_BANDS],
}

impl VoiceProfile {
    fn from_ranges(name: VoiceName, spans: [(f32, f32); FORMANT_BANDS]) -> Self {
        let freq_ranges = spans.map(|(lo_hz, hi_hz)| FormantRange { lo_hz, hi_hz });
        let freqs = freq_ranges.map(|r| r.mid());
        // Level/resonance shape is shared across families: strong low bands
        // tapering upward, moderate Q everywhere.
        let canonical = FormantVector::new(freqs, [55.0, 45.0, 30.0, 24.0], [4.0; 4]);
        Self {
            name,
            canonical,
            freq_ranges,
        }
    }

    /// Look up a profile by its family name string.
    pub fn get(name: &str) -> Result<&'static VoiceProfile> {
        Ok(by_name(VoiceName::parse(name)?))
    }
}

/// The full profile table, built once and validated on first access.
pub fn profiles() -> &'static [VoiceProfile; 7] {
    static TABLE: OnceLock<[VoiceProfile; 7]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let table = [
            VoiceProfile::from_ranges(
                VoiceName::Bass,
                [(300.0, 650.0), (700.0, 1200.0), (1700.0, 2400.0), (2200.0, 3200.0)],
            ),
            VoiceProfile::from_ranges(
                VoiceName::Baritone,
                [(330.0, 700.0), (800.0, 1350.0), (1800.0, 2500.0), (2300.0, 3400.0)],
            ),
            VoiceProfile::from_ranges(
                VoiceName::Tenor,
                [(380.0, 750.0), (900.0, 1500.0), (1900.0, 2600.0), (2400.0, 3400.0)],
            ),
            VoiceProfile::from_ranges(
                VoiceName::Alto,
                [(400.0, 800.0), (1000.0, 1700.0), (2100.0, 2900.0), (2600.0, 3500.0)],
            ),
            VoiceProfile::from_ranges(
                VoiceName::Mezzo,
                [(420.0, 850.0), (1100.0, 1800.0), (2200.0, 3000.0), (2700.0, 3600.0)],
            ),
            VoiceProfile::from_ranges(
                VoiceName::Soprano,
                [(450.0, 900.0), (1200.0, 2000.0), (2400.0, 3100.0), (2800.0, 3700.0)],
            ),
            VoiceProfile::from_ranges(
                VoiceName::Neutral,
                [(360.0, 780.0), (850.0, 1500.0), (1900.0, 2700.0), (2400.0, 3400.0)],
            ),
        ];
        for profile in &table {
            if !profile.canonical.is_ordered() {
                warn!(
                    profile = profile.name.as_str(),
                    freqs = ?profile.canonical.freqs,
                    "canonical formants are not strictly ascending"
                );
            }
        }
        table
    })
}

/// Look up a profile by its enum name. Infallible — the table rows are
/// laid out in `VoiceName::ALL` order.
pub fn by_name(name: VoiceName) -> &'static VoiceProfile {
    &profiles()[name as usize]
}
