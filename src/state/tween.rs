//! Time-based interpolation driven by an external frame ticker.
//!
//! Nothing here sleeps or spawns; callers sample a tween with the current
//! time on every frame.

use serde::Deserialize;

/// Interpolation between two values over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    /// Value at `start_ms`.
    pub from: u64,
    /// Value once the duration has elapsed.
    pub to: u64,
    /// Time the tween started.
    pub start_ms: u64,
    /// Length of the tween. Zero completes on the first sample.
    pub duration_ms: u64,
    /// Curve applied to the normalized time.
    pub easing: Easing,
}

impl Tween {
    /// Create a tween.
    pub fn new(from: u64, to: u64, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            easing,
        }
    }

    /// Whether the tween has reached its target at `now_ms`.
    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Value at `now_ms`.
    pub fn sample(&self, now_ms: u64) -> u64 {
        if self.is_done(now_ms) {
            return self.to;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        let eased = self.easing.sample(t);

        let from = self.from as f32;
        let to = self.to as f32;
        let v = from + (to - from) * eased;
        v.round().max(0.0) as u64
    }
}

/// Easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Hermite smoothstep, gentle at both ends.
    #[default]
    SmoothStep,
    /// Cubic ease-in-out.
    EaseInOutCubic,
}

impl Easing {
    /// Map normalized time `t` in `[0, 1]` to progress in `[0, 1]`.
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }

    /// Parse a config/CLI name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Self::Linear),
            "smooth-step" => Some(Self::SmoothStep),
            "ease-in-out-cubic" => Some(Self::EaseInOutCubic),
            _ => None,
        }
    }
}
