//! Label placement and text.

use crate::render::layout::{Extent, NodeId, Partition};

/// Where a wedge's label goes.
///
/// Applied in order: rotate by `rotate_deg` around the centre, move
/// `distance` outward along the rotated x axis, then rotate the text itself
/// by `flip_deg` so it never reads upside down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub rotate_deg: f64,
    pub distance: f64,
    pub flip_deg: f64,
}

impl LabelPlacement {
    /// Anchor point relative to the chart centre, screen coordinates.
    pub fn anchor(&self) -> [f64; 2] {
        let a = self.rotate_deg.to_radians();
        [self.distance * a.cos(), self.distance * a.sin()]
    }

    /// Final text rotation in radians (clockwise, screen coordinates).
    pub fn text_angle(&self) -> f64 {
        (self.rotate_deg + self.flip_deg).to_radians()
    }

    /// SVG-style transform string, traced per wedge by `Sunburst::frame`.
    pub fn to_transform(&self) -> String {
        format!(
            "rotate({}) translate({},0) rotate({})",
            self.rotate_deg, self.distance, self.flip_deg
        )
    }
}

pub fn label_placement(e: &Extent, radius: f64) -> LabelPlacement {
    let x = e.mid_angle().to_degrees();
    LabelPlacement {
        rotate_deg: x - 90.0,
        distance: e.mid_ring() * radius,
        flip_deg: if x < 180.0 { 0.0 } else { 180.0 },
    }
}

/// Upper-case the first letter of every word.
pub fn capitalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        if at_word_start && ch.is_alphabetic() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }
    out
}

/// Round to an integer and group thousands with commas.
pub fn format_value(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Hover text: the path from the root, then the subtree total.
pub fn tooltip(partition: &Partition, id: NodeId) -> String {
    format!("{}\n{}", partition.path(id), format_value(partition[id].value))
}
