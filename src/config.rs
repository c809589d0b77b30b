//! Chart configuration.
//!
//! Every knob has a default matching the classic zoomable sunburst; the
//! `with_*` builders override individual values.

use std::time::Duration;

use crate::error::{ChartError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Side length of the square drawing surface, in points.
    pub width: f32,
    /// Length of a zoom transition.
    pub duration: Duration,
    /// Upper bound of the angular padding between sibling wedges, in radians.
    pub max_pad_angle: f64,
    /// Pad radius as a multiple of the ring radius.
    pub pad_radius_factor: f64,
    /// Gap between consecutive rings, in points.
    pub ring_gap: f64,
    /// Outermost ring (in ring units) that is still drawn.
    pub visible_rings: f64,
    /// Minimum `(y1 - y0) * (x1 - x0)` for a label to be shown.
    pub min_label_area: f64,
    /// Centre circle radius as a multiple of the ring radius.
    pub center_radius_factor: f32,
    pub font_size: f32,
    /// Whether clicking a leaf zooms into it. Otherwise a leaf click emits a
    /// selection and moves the centre datum without a transition.
    pub zoom_leaves: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            duration: Duration::from_millis(700),
            max_pad_angle: 0.039,
            pad_radius_factor: 1.5,
            ring_gap: 1.0,
            visible_rings: 3.0,
            min_label_area: 0.03,
            center_radius_factor: 0.95,
            font_size: 12.0,
            zoom_leaves: false,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_zoom_leaves(mut self, enabled: bool) -> Self {
        self.zoom_leaves = enabled;
        self
    }

    /// Radius of one ring: a sixth of the width, so three rings fill half the
    /// surface.
    pub fn radius(&self) -> f64 {
        self.width as f64 / 6.0
    }

    pub fn pad_radius(&self) -> f64 {
        self.radius() * self.pad_radius_factor
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ChartError::InvalidConfig(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if self.duration.is_zero() {
            return Err(ChartError::InvalidConfig(
                "transition duration must be non-zero".into(),
            ));
        }
        if !(self.visible_rings >= 1.0) {
            return Err(ChartError::InvalidConfig(format!(
                "at least one ring must be visible, got {}",
                self.visible_rings
            )));
        }
        if self.max_pad_angle < 0.0 || self.ring_gap < 0.0 || self.min_label_area < 0.0 {
            return Err(ChartError::InvalidConfig(
                "padding, gap and label area must not be negative".into(),
            ));
        }
        if !(self.font_size > 0.0) {
            return Err(ChartError::InvalidConfig(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        Ok(())
    }
}
