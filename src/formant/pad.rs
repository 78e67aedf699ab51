use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A point on the voice pad.
///
/// The domain is fixed to `[-1, 1] × [-1, 1]`:
/// x runs dark (-1) to bright (+1), y runs chest (-1) to head (+1).
/// Construction rejects coordinates outside the domain, so a `PadPoint`
/// is always valid once it exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PadPoint {
    x: f32,
    y: f32,
}

impl PadPoint {
    pub const ORIGIN: PadPoint = PadPoint { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Result<Self> {
        let in_domain = |v: f32| v.is_finite() && (-1.0..=1.0).contains(&v);
        if in_domain(x) && in_domain(y) {
            Ok(Self { x, y })
        } else {
            Err(Error::InvalidPad { x, y })
        }
    }

    /// Pull arbitrary coordinates into the domain instead of rejecting them.
    /// Used for values we derive ourselves (fingerprint mapping); user input
    /// goes through [`PadPoint::new`].
    pub fn clamped(x: f32, y: f32) -> Self {
        let squash = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        Self {
            x: squash(x),
            y: squash(y),
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }
}
