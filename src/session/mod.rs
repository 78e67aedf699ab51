//! A/B session state and the control-event loop.
//!
//! The session owns the captured base preset, the derived processed preset,
//! and the A/B selector. It is the single writer of that state: events come
//! in one at a time, each recompute is synchronous and pure, and dispatch
//! work leaves as a [`DispatchRequest`] for the throttler rather than as a
//! direct side effect.

/// Control event values and the receiver boundary.
pub mod event;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::Fingerprint;
use crate::engine::{compute, Tuning};
use crate::error::{Error, Result};
use crate::formant::profile::by_name;
use crate::formant::{FormantVector, PadPoint, VoiceName, VoiceProfile};

pub use event::{ControlEvent, EventReceiver};

/// Which preset the hardware should be hearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbState {
    Base,
    Processed,
}

impl AbState {
    fn flipped(self) -> Self {
        match self {
            AbState::Base => AbState::Processed,
            AbState::Processed => AbState::Base,
        }
    }
}

/// Dispatch work produced by an event: the vector to send and whether the
/// full vector must go out (mandatory after an A/B toggle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchRequest {
    pub vector: FormantVector,
    pub force_full: bool,
}

/// One pad-driven shaping session.
pub struct Session {
    profile: &'static VoiceProfile,
    pad: PadPoint,
    brightness: f32,
    resonance: f32,
    base: Option<FormantVector>,
    processed: Option<FormantVector>,
    ab: AbState,
    fingerprint: Option<Fingerprint>,
    tuning: Tuning,
}

impl Session {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            profile: by_name(VoiceName::Tenor),
            pad: PadPoint::ORIGIN,
            brightness: 0.0,
            resonance: 0.0,
            base: None,
            processed: None,
            // The hardware starts out on whatever preset it already holds.
            ab: AbState::Base,
            fingerprint: None,
            tuning,
        }
    }

    pub fn ab(&self) -> AbState {
        self.ab
    }

    pub fn pad(&self) -> PadPoint {
        self.pad
    }

    pub fn base(&self) -> Option<&FormantVector> {
        self.base.as_ref()
    }

    pub fn processed(&self) -> Option<&FormantVector> {
        self.processed.as_ref()
    }

    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.fingerprint.as_ref()
    }

    /// The vector selected by the A/B state — the only one dispatch may send.
    pub fn current(&self) -> Result<&FormantVector> {
        let v = match self.ab {
            AbState::Base => self.base.as_ref(),
            AbState::Processed => self.processed.as_ref(),
        };
        v.ok_or(Error::MissingBase)
    }

    /// Overwrite the captured base. Only an explicit capture reaches this;
    /// the processed preset is recomputed against the new base.
    pub fn capture_base(&mut self, v: FormantVector) -> Result<()> {
        self.base = Some(v);
        self.processed = Some(self.recompute()?);
        Ok(())
    }

    /// Replace the processed preset directly, e.g. when restoring one from
    /// a saved slot. Normal shaping goes through events and recompute.
    pub fn set_processed(&mut self, v: FormantVector) {
        self.processed = Some(v);
    }

    /// Flip A/B and return the new state with its mandatory full dispatch.
    ///
    /// Partial diffs are not allowed here: only a full resend guarantees the
    /// hardware converges on the selected vector.
    pub fn toggle(&mut self) -> Result<(AbState, DispatchRequest)> {
        let next = self.ab.flipped();
        let vector = *match next {
            AbState::Base => self.base.as_ref().ok_or(Error::MissingBase)?,
            AbState::Processed => self.processed.as_ref().ok_or(Error::MissingBase)?,
        };
        self.ab = next;
        Ok((
            next,
            DispatchRequest {
                vector,
                force_full: true,
            },
        ))
    }

    /// Consume one control event and return any dispatch work it produced.
    ///
    /// Recompute-bearing events fail with [`Error::MissingBase`] until a
    /// base has been captured; nothing is silently defaulted because a
    /// made-up vector would be sent to physical hardware.
    pub fn handle(&mut self, event: ControlEvent) -> Result<Option<DispatchRequest>> {
        match event {
            ControlEvent::PadMoved(pad) => {
                self.pad = pad;
                self.refresh()
            }
            ControlEvent::BrightnessChanged(value) => {
                self.brightness = value.clamp(-1.0, 1.0);
                self.refresh()
            }
            ControlEvent::ResonanceChanged(value) => {
                self.resonance = value.clamp(-1.0, 1.0);
                self.refresh()
            }
            ControlEvent::ProfileSelected(name) => {
                self.profile = by_name(name);
                self.refresh()
            }
            ControlEvent::ToggleRequested => {
                let (_, request) = self.toggle()?;
                Ok(Some(request))
            }
            ControlEvent::CaptureBase(v) => {
                // The captured vector came from the hardware, so the base
                // side owes nothing; a stale processed side still does.
                self.base = Some(v);
                self.refresh()
            }
            ControlEvent::FingerprintReady(fp) => {
                self.fingerprint = Some(fp);
                Ok(None)
            }
            ControlEvent::SnapToFingerprint => match self.fingerprint {
                Some(fp) => {
                    self.pad = fp.pad;
                    self.refresh()
                }
                None => {
                    debug!("snap requested with no fingerprint loaded");
                    Ok(None)
                }
            },
        }
    }

    /// Recompute the processed preset and, when the A/B selector points at
    /// it, emit a diffable dispatch. Changes made while listening to the
    /// base are computed but not sent.
    fn refresh(&mut self) -> Result<Option<DispatchRequest>> {
        let vector = self.recompute()?;
        self.processed = Some(vector);
        Ok(match self.ab {
            AbState::Processed => Some(DispatchRequest {
                vector,
                force_full: false,
            }),
            AbState::Base => None,
        })
    }

    fn recompute(&self) -> Result<FormantVector> {
        compute(
            self.base.as_ref(),
            self.pad,
            self.profile,
            self.brightness,
            self.resonance,
            &self.tuning,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> FormantVector {
        FormantVector::new(
            [500.0, 1500.0, 2500.0, 3500.0],
            [50.0, 40.0, 28.0, 20.0],
            [3.0, 3.0, 5.0, 5.0],
        )
    }

    fn session_with_base() -> Session {
        let mut s = Session::new(Tuning::default());
        s.capture_base(base()).unwrap();
        s
    }

    #[test]
    fn events_before_capture_fail_with_missing_base() {
        let mut s = Session::new(Tuning::default());
        let err = s
            .handle(ControlEvent::PadMoved(PadPoint::new(0.5, 0.5).unwrap()))
            .unwrap_err();
        assert!(matches!(err, Error::MissingBase));
        assert!(matches!(s.current(), Err(Error::MissingBase)));
    }

    #[test]
    fn capture_recomputes_the_processed_preset() {
        let s = session_with_base();
        // Origin + neutral sliders reproduce the base.
        assert_eq!(s.processed(), Some(&base()));
        assert_eq!(s.ab(), AbState::Base);
    }

    #[test]
    fn toggling_twice_returns_to_the_original_vector_with_full_dispatches() {
        let mut s = session_with_base();
        s.handle(ControlEvent::PadMoved(PadPoint::new(0.3, 0.8).unwrap()))
            .unwrap();

        let (state_a, first) = s.toggle().unwrap();
        assert_eq!(state_a, AbState::Processed);
        assert!(first.force_full);

        let (state_b, second) = s.toggle().unwrap();
        assert_eq!(state_b, AbState::Base);
        assert!(second.force_full);
        assert_eq!(second.vector, base());
        assert_ne!(first.vector, second.vector);
    }

    #[test]
    fn capture_while_on_processed_resends_the_fresh_processed_preset() {
        let mut s = session_with_base();
        s.handle(ControlEvent::PadMoved(PadPoint::new(0.2, 0.6).unwrap()))
            .unwrap();
        s.handle(ControlEvent::ToggleRequested).unwrap();
        assert_eq!(s.ab(), AbState::Processed);

        // A new capture shifts the blend under the hardware's feet; the
        // processed side must go back out.
        let mut new_base = base();
        new_base.freqs[0] = 550.0;
        let sent = s
            .handle(ControlEvent::CaptureBase(new_base))
            .unwrap()
            .expect("capture while on processed must dispatch");
        assert_eq!(Some(&sent.vector), s.processed());

        // Capturing while listening to the base stays silent: the vector
        // came from the hardware itself.
        s.handle(ControlEvent::ToggleRequested).unwrap();
        assert!(s
            .handle(ControlEvent::CaptureBase(base()))
            .unwrap()
            .is_none());
    }

    #[test]
    fn pad_moves_dispatch_only_while_listening_to_processed() {
        let mut s = session_with_base();
        let quiet = s
            .handle(ControlEvent::PadMoved(PadPoint::new(0.4, 0.1).unwrap()))
            .unwrap();
        assert!(quiet.is_none(), "base side must stay silent");

        s.handle(ControlEvent::ToggleRequested).unwrap();
        let sent = s
            .handle(ControlEvent::PadMoved(PadPoint::new(0.5, 0.2).unwrap()))
            .unwrap()
            .expect("processed side must dispatch");
        assert!(!sent.force_full, "drag updates may be diffed");
    }

    #[test]
    fn recompute_is_deterministic_for_identical_inputs() {
        let mut a = session_with_base();
        let mut b = session_with_base();
        let pad = PadPoint::new(-0.2, 0.9).unwrap();
        for s in [&mut a, &mut b] {
            s.handle(ControlEvent::BrightnessChanged(0.6)).unwrap();
            s.handle(ControlEvent::PadMoved(pad)).unwrap();
        }
        assert_eq!(a.processed(), b.processed());
    }

    #[test]
    fn snap_moves_the_pad_to_the_fingerprint() {
        let mut s = session_with_base();
        assert!(s.handle(ControlEvent::SnapToFingerprint).unwrap().is_none());

        let clip: Vec<f32> = (0..24_000)
            .map(|i| (std::f32::consts::TAU * 2_500.0 * i as f32 / 48_000.0).sin())
            .collect();
        let fp = crate::analysis::analyze(&clip, 48_000, &Tuning::default()).unwrap();
        s.handle(ControlEvent::FingerprintReady(fp)).unwrap();
        s.handle(ControlEvent::SnapToFingerprint).unwrap();
        assert_eq!(s.pad(), fp.pad);
    }

    #[test]
    fn profile_change_reshapes_the_processed_preset() {
        let mut s = session_with_base();
        s.handle(ControlEvent::PadMoved(PadPoint::new(0.0, 1.0).unwrap()))
            .unwrap();
        let tenor = *s.processed().unwrap();
        s.handle(ControlEvent::ProfileSelected(VoiceName::Soprano))
            .unwrap();
        let soprano = *s.processed().unwrap();
        assert_ne!(tenor, soprano);
        assert_eq!(soprano.freqs, by_name(VoiceName::Soprano).canonical.freqs);
    }
}
