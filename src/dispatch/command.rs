use serde::{Deserialize, Serialize};

use crate::formant::{FieldKind, FormantField, FormantVector, LEVEL_MAX, RES_MAX, RES_MIN};

/// One outbound "set parameter" command, already encoded into the numeric
/// range the librarian accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobCommand {
    pub field: FormantField,
    pub value: f32,
}

impl KnobCommand {
    /// Parameter identifier exactly as the sink expects it (F1..R4).
    pub fn label(&self) -> &'static str {
        self.field.label()
    }
}

/// Numeric mapping between engine values and the sink's knob ranges.
///
/// Frequencies travel as knob positions rather than Hz; the linear span
/// below matches the instrument's formant-frequency knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnobMap {
    pub freq_lo_hz: f32,
    pub freq_hi_hz: f32,
    pub knob_lo: f32,
    pub knob_hi: f32,
}

impl Default for KnobMap {
    fn default() -> Self {
        Self {
            freq_lo_hz: 200.0,
            freq_hi_hz: 4_000.0,
            knob_lo: 100.0,
            knob_hi: 3_500.0,
        }
    }
}

impl KnobMap {
    /// Encode one field value into the sink's accepted range. Out-of-range
    /// inputs are clamped, never passed through or rejected.
    pub fn encode(&self, field: FormantField, value: f32) -> f32 {
        match field.kind {
            FieldKind::Freq => {
                let f = value.clamp(self.freq_lo_hz, self.freq_hi_hz);
                let t = (f - self.freq_lo_hz) / (self.freq_hi_hz - self.freq_lo_hz);
                (self.knob_lo + t * (self.knob_hi - self.knob_lo)).round()
            }
            FieldKind::Level => value.clamp(0.0, LEVEL_MAX).round(),
            FieldKind::Res => value.clamp(RES_MIN, RES_MAX).round(),
        }
    }
}

/// Plan the command sequence for sending `next`.
///
/// The order is always F1..F4, L1..L4, R1..R4. With a previous vector and
/// `force_full == false`, only fields whose raw value changed are included
/// (diffing is an optimization; an A/B toggle passes `force_full` so the
/// hardware and in-memory state converge on the complete vector).
pub fn plan(
    last: Option<&FormantVector>,
    next: &FormantVector,
    force_full: bool,
    map: &KnobMap,
) -> Vec<KnobCommand> {
    FormantField::ORDER
        .iter()
        .filter(|&&field| match (force_full, last) {
            (true, _) | (_, None) => true,
            (false, Some(prev)) => prev.get(field) != next.get(field),
        })
        .map(|&field| KnobCommand {
            field,
            value: map.encode(field, next.get(field)),
        })
        .collect()
}
