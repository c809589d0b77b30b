//! Chart viewport for `BirdringApp`.

use eframe::egui;

use birdring::Hit;

use super::BirdringApp;

impl BirdringApp {
    /// Paint the sunburst into the remaining space and log clicks.
    pub fn draw_content(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        match self.view.paint(ui, ctx, &mut self.chart) {
            Some(Hit::Arc(id)) => {
                log::debug!("clicked '{}'", self.chart.partition().path(id));
            }
            Some(Hit::Center) => {
                log::debug!("clicked centre");
            }
            None => {}
        }
    }
}
