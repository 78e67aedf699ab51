#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::analysis::Fingerprint;
use crate::formant::{FormantVector, PadPoint, VoiceName};

/// Discrete control events consumed by the session loop.
///
/// UI callbacks, slider widgets, and finished analysis tasks all reduce to
/// these values, so the loop stays a single synchronous consumer with no
/// callback chains.
#[derive(Debug, Clone, Copy)]
pub enum ControlEvent {
    PadMoved(PadPoint),
    BrightnessChanged(f32),
    ResonanceChanged(f32),
    ProfileSelected(VoiceName),
    ToggleRequested,
    CaptureBase(FormantVector),
    /// A background analysis finished; display-only until a snap.
    FingerprintReady(Fingerprint),
    SnapToFingerprint,
}

pub trait EventReceiver {
    fn pop(&mut self) -> Option<ControlEvent>;
}

#[cfg(feature = "rtrb")]
impl EventReceiver for Consumer<ControlEvent> {
    fn pop(&mut self) -> Option<ControlEvent> {
        Consumer::pop(self).ok()
    }
}
