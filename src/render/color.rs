//! Rainbow palette for top-level wedges.
//!
//! Colours come from the cubehelix "rainbow" ramp sampled at evenly spaced
//! points. The ramp is cyclic (0 and 1 give the same colour), so `n` groups
//! sample `n + 1` points and use the first `n`.

use egui::Color32;

use crate::render::layout::{NodeId, Partition};

// Cubehelix basis.
const A: f64 = -0.14861;
const B: f64 = 1.78277;
const C: f64 = -0.29227;
const D: f64 = -0.90649;
const E: f64 = 1.97294;

/// Convert cubehelix (hue in degrees, saturation, lightness) to sRGB.
pub fn cubehelix(h: f64, s: f64, l: f64) -> Color32 {
    let h = (h + 120.0).to_radians();
    let a = s * l * (1.0 - l);
    let (sin_h, cos_h) = h.sin_cos();
    let channel = |v: f64| (255.0 * v).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgb(
        channel(l + a * (A * cos_h + B * sin_h)),
        channel(l + a * (C * cos_h + D * sin_h)),
        channel(l + a * (E * cos_h)),
    )
}

/// Cyclic rainbow ramp; `t` outside `[0, 1]` wraps around.
pub fn rainbow(t: f64) -> Color32 {
    let t = if (0.0..=1.0).contains(&t) { t } else { t - t.floor() };
    let ts = (t - 0.5).abs();
    cubehelix(360.0 * t - 100.0, 1.5 - 1.5 * ts, 0.8 - 0.9 * ts)
}

/// `n` evenly spaced samples of `ramp` over `[0, 1]`.
pub fn quantize(ramp: impl Fn(f64) -> Color32, n: usize) -> Vec<Color32> {
    match n {
        0 => Vec::new(),
        1 => vec![ramp(0.0)],
        _ => (0..n).map(|i| ramp(i as f64 / (n - 1) as f64)).collect(),
    }
}

/// Fill colour for every node, inherited from its depth-1 ancestor.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Color32>,
}

impl Palette {
    pub fn new(partition: &Partition) -> Self {
        let groups = &partition.root().children;
        let swatches = quantize(rainbow, groups.len() + 1);
        let root_color = swatches.first().copied().unwrap_or(Color32::GRAY);

        let colors = partition
            .descendants()
            .map(|node| {
                let top = partition.top_level_ancestor(node.id);
                groups
                    .iter()
                    .position(|g| *g == top)
                    .and_then(|i| swatches.get(i).copied())
                    .unwrap_or(root_color)
            })
            .collect();
        Self { colors }
    }

    pub fn color(&self, id: NodeId) -> Color32 {
        self.colors.get(id.0).copied().unwrap_or(Color32::GRAY)
    }
}
