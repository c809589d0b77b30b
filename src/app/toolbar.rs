//! Toolbar rendering for `BirdringApp`.
//!
//! Draws the zoom-out button, the focused path, and the selected-datum
//! label that mirrors every `datumSelected` event.

use std::time::Instant;

use eframe::egui;

use super::BirdringApp;

impl BirdringApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);

            let root = self.chart.partition().root().id;
            let can_zoom_out = self.chart.focused() != root;
            if ui
                .add_enabled(
                    can_zoom_out,
                    egui::Button::new("\u{25C0}").min_size(egui::vec2(28.0, 24.0)),
                )
                .on_hover_text("Zoom out")
                .clicked()
            {
                self.chart.click_center(Instant::now());
                ui.ctx().request_repaint();
            }

            let focus_path = self.chart.partition().path(self.chart.focused());
            ui.monospace(focus_path);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(4.0);
                let text = if self.selected.text().is_empty() {
                    egui::RichText::new("nothing selected").color(egui::Color32::GRAY)
                } else {
                    egui::RichText::new(self.selected.text()).strong()
                };
                ui.label(text);
                ui.label("Selected:");
            });
        });
    }
}
