//! Which wedges and labels are drawn for a given extent.
//!
//! Only rings 1 through `rings` are shown: ring 0 is covered by the centre
//! circle and anything further out falls off the surface. All checks are
//! pure functions of the extent.

use crate::config::ChartConfig;
use crate::render::layout::Extent;

/// Fill opacity of a visible wedge with children.
pub const BRANCH_OPACITY: f32 = 0.6;
/// Fill opacity of a visible leaf wedge.
pub const LEAF_OPACITY: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    pub rings: f64,
    pub min_label_area: f64,
}

impl Default for Visibility {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

impl Visibility {
    pub fn from_config(cfg: &ChartConfig) -> Self {
        Self {
            rings: cfg.visible_rings,
            min_label_area: cfg.min_label_area,
        }
    }

    fn in_rings(&self, e: &Extent) -> bool {
        e.y1 <= self.rings && e.y0 >= 1.0
    }

    pub fn arc_visible(&self, e: &Extent) -> bool {
        self.in_rings(e) && e.x1 > e.x0
    }

    /// Labels also need enough room: ring span times angle span must exceed
    /// the configured area.
    pub fn label_visible(&self, e: &Extent) -> bool {
        self.in_rings(e) && e.ring_span() * e.angle_span() > self.min_label_area
    }

    pub fn fill_opacity(&self, e: &Extent, has_children: bool) -> f32 {
        match (self.arc_visible(e), has_children) {
            (false, _) => 0.0,
            (true, true) => BRANCH_OPACITY,
            (true, false) => LEAF_OPACITY,
        }
    }

    pub fn label_opacity(&self, e: &Extent) -> f32 {
        if self.label_visible(e) {
            1.0
        } else {
            0.0
        }
    }
}

pub fn arc_visible(e: &Extent) -> bool {
    Visibility::default().arc_visible(e)
}

pub fn label_visible(e: &Extent) -> bool {
    Visibility::default().label_visible(e)
}
