//! egui Painter-based sunburst rendering.
//!
//! Draws one frame of a `Sunburst`: wedges as triangle meshes, rotated
//! labels, the centre circle, plus hover tooltips and click routing.

use std::time::Instant;

use egui::emath::Rot2;
use egui::epaint::TextShape;
use egui::{Color32, FontId, Mesh, Pos2, Sense, Shape, Stroke, Vec2};

use crate::engine::sunburst::{ArcFrame, Hit, Sunburst};
use crate::render::arc::ArcShape;
use crate::render::color::Palette;
use crate::render::label::{capitalize, tooltip};

const BACKGROUND: Color32 = Color32::WHITE;
const LABEL_COLOR: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);

/// Persistent view state for one chart.
pub struct SunburstView {
    palette: Palette,
    hovered: Option<Hit>,
}

impl SunburstView {
    pub fn new(chart: &Sunburst) -> Self {
        Self {
            palette: Palette::new(chart.partition()),
            hovered: None,
        }
    }

    /// Advance the chart's transition, draw it into the largest square that
    /// fits, and route clicks. Returns what was clicked, if anything.
    pub fn paint(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        chart: &mut Sunburst,
    ) -> Option<Hit> {
        let now = Instant::now();
        if chart.tick(now) {
            ctx.request_repaint();
        }

        let side = ui.available_width().min(ui.available_height()).max(1.0);
        let (rect, response) = ui.allocate_exact_size(
            Vec2::splat(side),
            Sense::click().union(Sense::hover()),
        );
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BACKGROUND);

        let center = rect.center();
        let scale = side / chart.config().width;
        let to_chart = |p: Pos2| -> [f64; 2] {
            let d = (p - center) / scale;
            [d.x as f64, d.y as f64]
        };

        self.hovered = response.hover_pos().and_then(|p| chart.hit_test(to_chart(p)));

        let frame = chart.frame();
        for arc in &frame {
            if arc.fill_opacity <= 0.0 {
                continue;
            }
            let color = with_opacity(self.palette.color(arc.id), arc.fill_opacity);
            painter.add(Shape::mesh(arc_mesh(&arc.shape, center, scale, color)));
        }

        let font = FontId::proportional(chart.config().font_size * scale);
        for arc in &frame {
            if arc.label_opacity <= 0.0 {
                continue;
            }
            let name = capitalize(&chart.partition()[arc.id].name);
            draw_label(&painter, ctx, arc, &name, center, scale, font.clone());
        }

        let center_r = chart.config().radius() as f32 * chart.config().center_radius_factor * scale;
        let center_stroke = if self.hovered == Some(Hit::Center) {
            Stroke::new(1.0, Color32::from_gray(210))
        } else {
            Stroke::NONE
        };
        painter.circle(center, center_r, BACKGROUND, center_stroke);

        let mut clicked = None;
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                clicked = chart.click_at(to_chart(pos), now);
                if clicked.is_some() {
                    ctx.request_repaint();
                }
            }
        }

        match self.hovered {
            Some(Hit::Arc(id)) => {
                ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
                response.on_hover_text(tooltip(chart.partition(), id));
            }
            Some(Hit::Center) if chart.center() != chart.focused() => {
                ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
                response.on_hover_text(tooltip(chart.partition(), chart.center()));
            }
            _ => {}
        }

        clicked
    }
}

fn with_opacity(c: Color32, opacity: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), (opacity.clamp(0.0, 1.0) * 255.0) as u8)
}

fn to_screen(p: [f64; 2], center: Pos2, scale: f32) -> Pos2 {
    center + Vec2::new(p[0] as f32, p[1] as f32) * scale
}

/// Triangle strip between the outer and inner edges of a sector.
fn arc_mesh(shape: &ArcShape, center: Pos2, scale: f32, color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    if shape.is_empty() {
        return mesh;
    }
    let (outer, inner) = shape.outline();
    for (o, i) in outer.iter().zip(inner.iter()) {
        mesh.colored_vertex(to_screen(*o, center, scale), color);
        mesh.colored_vertex(to_screen(*i, center, scale), color);
    }
    let quads = outer.len().saturating_sub(1) as u32;
    for q in 0..quads {
        let (o0, i0, o1, i1) = (2 * q, 2 * q + 1, 2 * q + 2, 2 * q + 3);
        mesh.add_triangle(o0, i0, o1);
        mesh.add_triangle(i0, i1, o1);
    }
    mesh
}

fn draw_label(
    painter: &egui::Painter,
    ctx: &egui::Context,
    arc: &ArcFrame,
    text: &str,
    center: Pos2,
    scale: f32,
    font: FontId,
) {
    let color = with_opacity(LABEL_COLOR, arc.label_opacity);
    let galley = ctx.fonts(|f| f.layout_no_wrap(text.to_owned(), font, color));
    let angle = arc.label.text_angle() as f32;
    let anchor = to_screen(arc.label.anchor(), center, scale);
    // Galleys rotate around their top-left corner; shift so the text is
    // centred on the anchor.
    let half = galley.size() / 2.0;
    let pos = anchor - Rot2::from_angle(angle) * half;
    painter.add(TextShape::new(pos, galley, color).with_angle(angle));
}
