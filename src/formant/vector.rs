use serde::{Deserialize, Serialize};

use crate::FORMANT_BANDS;

/// Maximum formant level accepted by the hardware knobs.
pub const LEVEL_MAX: f32 = 63.0;
/// Resonance knob range accepted by the hardware.
pub const RES_MIN: f32 = 0.0;
pub const RES_MAX: f32 = 7.0;

/// Which of the three per-band parameters a field addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Freq,
    Level,
    Res,
}

/// One of the twelve formant fields, e.g. F2 or R4.
///
/// `band` is zero-based, so F1 is `FormantField { kind: Freq, band: 0 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormantField {
    pub kind: FieldKind,
    pub band: usize,
}

impl FormantField {
    /// Fixed transmission order: F1..F4, L1..L4, R1..R4.
    ///
    /// The librarian applies commands sequentially, so dispatch walks this
    /// order and never reorders fields between sends.
    pub const ORDER: [FormantField; 12] = {
        let mut order = [FormantField {
            kind: FieldKind::Freq,
            band: 0,
        }; 12];
        let kinds = [FieldKind::Freq, FieldKind::Level, FieldKind::Res];
        let mut k = 0;
        while k < 3 {
            let mut band = 0;
            while band < FORMANT_BANDS {
                order[k * FORMANT_BANDS + band] = FormantField {
                    kind: kinds[k],
                    band,
                };
                band += 1;
            }
            k += 1;
        }
        order
    };

    /// Parameter identifier as the librarian accepts it.
    pub fn label(&self) -> &'static str {
        const LABELS: [[&str; 4]; 3] = [
            ["F1", "F2", "F3", "F4"],
            ["L1", "L2", "L3", "L4"],
            ["R1", "R2", "R3", "R4"],
        ];
        let row = match self.kind {
            FieldKind::Freq => 0,
            FieldKind::Level => 1,
            FieldKind::Res => 2,
        };
        LABELS[row][self.band]
    }
}

/// Full formant parameter set: frequencies (Hz), levels, and resonances for
/// the four bands.
///
/// F1 < F2 < F3 < F4 is a soft invariant — expected for vocal timbres but
/// deliberately not enforced, since special timbres break strict ordering.
/// Use [`FormantVector::is_ordered`] to check it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormantVector {
    pub freqs: [f32; FORMANT_BANDS],
    pub levels: [f32; FORMANT_BANDS],
    pub resonances: [f32; FORMANT_BANDS],
}

impl FormantVector {
    pub fn new(
        freqs: [f32; FORMANT_BANDS],
        levels: [f32; FORMANT_BANDS],
        resonances: [f32; FORMANT_BANDS],
    ) -> Self {
        Self {
            freqs,
            levels,
            resonances,
        }
    }

    /// Raw value of one field.
    pub fn get(&self, field: FormantField) -> f32 {
        match field.kind {
            FieldKind::Freq => self.freqs[field.band],
            FieldKind::Level => self.levels[field.band],
            FieldKind::Res => self.resonances[field.band],
        }
    }

    /// Copy with one field replaced. Returns a new vector; the receiver is
    /// left untouched.
    pub fn with(&self, field: FormantField, value: f32) -> Self {
        let mut out = *self;
        match field.kind {
            FieldKind::Freq => out.freqs[field.band] = value,
            FieldKind::Level => out.levels[field.band] = value,
            FieldKind::Res => out.resonances[field.band] = value,
        }
        out
    }

    /// Copy with levels and resonances pulled into hardware bounds and
    /// frequencies floored at zero.
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for band in 0..FORMANT_BANDS {
            out.freqs[band] = out.freqs[band].max(0.0);
            out.levels[band] = out.levels[band].clamp(0.0, LEVEL_MAX);
            out.resonances[band] = out.resonances[band].clamp(RES_MIN, RES_MAX);
        }
        out
    }

    /// Whether frequencies rise monotonically across the bands.
    pub fn is_ordered(&self) -> bool {
        self.freqs.windows(2).all(|w| w[0] < w[1])
    }

    /// All twelve fields in transmission order.
    pub fn fields(&self) -> impl Iterator<Item = (FormantField, f32)> + '_ {
        FormantField::ORDER.iter().map(|&f| (f, self.get(f)))
    }
}
