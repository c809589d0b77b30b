//! Annular-sector geometry.
//!
//! Angles are measured clockwise from twelve o'clock, matching screen
//! coordinates where `y` grows downward: a point at angle `a` and radius `r`
//! sits at `(r·sin a, −r·cos a)` relative to the chart centre.

use std::f64::consts::TAU;

use crate::config::ChartConfig;
use crate::render::layout::Extent;

const EPSILON: f64 = 1e-12;

/// Angular resolution of tessellated arcs (2 degrees).
const STEP: f64 = TAU / 180.0;

/// Resolved sector ready to be drawn or hit-tested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcShape {
    pub start: f64,
    pub end: f64,
    pub inner: f64,
    pub outer: f64,
    /// Total pad angle; half is taken from each side.
    pub pad_angle: f64,
    pub pad_radius: f64,
}

/// Map an extent to sector geometry.
///
/// Inner radius is `y0·R`, outer radius `y1·R` minus the ring gap but never
/// below the inner radius. The pad angle is capped so thin wedges keep at
/// least half their span.
pub fn arc_shape(e: &Extent, cfg: &ChartConfig) -> ArcShape {
    let radius = cfg.radius();
    let inner = e.y0 * radius;
    let outer = (e.y1 * radius - cfg.ring_gap).max(inner);
    ArcShape {
        start: e.x0,
        end: e.x1,
        inner,
        outer,
        pad_angle: (e.angle_span() / 2.0).min(cfg.max_pad_angle),
        pad_radius: cfg.pad_radius(),
    }
}

pub fn polar(angle: f64, r: f64) -> [f64; 2] {
    [r * angle.sin(), -r * angle.cos()]
}

impl ArcShape {
    /// Start/end angles after padding at radius `r`.
    ///
    /// The same pad arc length is removed at every radius, so the gap between
    /// siblings has parallel edges. When the wedge is too thin at `r` it
    /// collapses onto its mid-angle.
    pub fn padded_angles(&self, r: f64) -> (f64, f64) {
        let half = self.pad_angle / 2.0;
        if half <= EPSILON || self.pad_radius <= EPSILON {
            return (self.start, self.end);
        }
        let mid = (self.start + self.end) / 2.0;
        if r <= EPSILON {
            return (mid, mid);
        }
        let ratio = self.pad_radius / r * half.sin();
        if ratio > 1.0 {
            return (mid, mid);
        }
        let p = ratio.asin();
        if self.end - self.start - 2.0 * p > EPSILON {
            (self.start + p, self.end - p)
        } else {
            (mid, mid)
        }
    }

    /// True when nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.end - self.start <= EPSILON || self.outer - self.inner <= EPSILON
    }

    /// Outer and inner edges sampled at matching fractions, outer first.
    ///
    /// Both vectors have the same length (at least two points), so consecutive
    /// pairs form the quads of a triangle strip.
    pub fn outline(&self) -> (Vec<[f64; 2]>, Vec<[f64; 2]>) {
        let (o0, o1) = self.padded_angles(self.outer);
        let (i0, i1) = self.padded_angles(self.inner);
        let steps = (((o1 - o0).abs() / STEP).ceil() as usize).max(1);

        let mut outer = Vec::with_capacity(steps + 1);
        let mut inner = Vec::with_capacity(steps + 1);
        for s in 0..=steps {
            let f = s as f64 / steps as f64;
            outer.push(polar(o0 + (o1 - o0) * f, self.outer));
            inner.push(polar(i0 + (i1 - i0) * f, self.inner));
        }
        (outer, inner)
    }

    /// Whether `point` (relative to the chart centre) falls inside the
    /// unpadded sector.
    pub fn contains(&self, point: [f64; 2]) -> bool {
        if self.is_empty() {
            return false;
        }
        let r = point[0].hypot(point[1]);
        if r < self.inner || r > self.outer {
            return false;
        }
        let angle = point[0].atan2(-point[1]).rem_euclid(TAU);
        angle >= self.start && angle <= self.end
    }
}
