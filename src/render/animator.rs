//! Zoom transition timing and interpolation.
//!
//! A transition maps wall-clock time to an eased fraction `t ∈ [0, 1]`;
//! tweens turn that fraction into extents and opacities. Tweens capture their
//! start value when the transition begins, so an interrupted zoom resumes
//! from wherever the wedges currently are.

use std::time::{Duration, Instant};

use crate::render::layout::Extent;

/// Cubic ease-in-out.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub fn lerp_f32(a: f32, b: f32, t: f64) -> f32 {
    a + (b - a) * t as f32
}

/// Componentwise linear interpolation of two extents.
pub fn lerp_extent(a: &Extent, b: &Extent, t: f64) -> Extent {
    Extent {
        x0: lerp(a.x0, b.x0, t),
        x1: lerp(a.x1, b.x1, t),
        y0: lerp(a.y0, b.y0, t),
        y1: lerp(a.y1, b.y1, t),
    }
}

/// Per-node animation from one resting state to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: Extent,
    pub to: Extent,
    pub fill: (f32, f32),
    pub label: (f32, f32),
}

impl Tween {
    /// A tween that stays at `extent` with the given opacities.
    pub fn rest(extent: Extent, fill: f32, label: f32) -> Self {
        Self {
            from: extent,
            to: extent,
            fill: (fill, fill),
            label: (label, label),
        }
    }

    pub fn extent_at(&self, t: f64) -> Extent {
        lerp_extent(&self.from, &self.to, t)
    }

    pub fn fill_at(&self, t: f64) -> f32 {
        lerp_f32(self.fill.0, self.fill.1, t)
    }

    pub fn label_at(&self, t: f64) -> f32 {
        lerp_f32(self.label.0, self.label.1, t)
    }
}

/// One running zoom. Every node's tween is driven by the same transition so
/// shapes and opacities stay in step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub token: u64,
    pub started: Instant,
    pub duration: Duration,
}

impl Transition {
    pub fn new(token: u64, started: Instant, duration: Duration) -> Self {
        Self {
            token,
            started,
            duration,
        }
    }

    /// Linear time fraction, clamped to `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Eased fraction fed to the tweens.
    pub fn eased(&self, now: Instant) -> f64 {
        ease_cubic_in_out(self.progress(now))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}
