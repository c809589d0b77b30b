//! `BirdringApp` — the top-level egui application state.
//!
//! This module declares the `BirdringApp` struct and its `eframe::App` impl.
//! Drawing is split across the sibling sub-modules:
//!
//! - `toolbar` — header strip with zoom-out control and the selected datum
//! - `content` — the chart viewport

pub mod content;
pub mod toolbar;

use std::sync::mpsc;

use eframe::egui;

use birdring::render::paint::SunburstView;
use birdring::{ChartConfig, Result, SelectedDatum, SelectionEvent, Sunburst};

// ─── Application state ───────────────────────────────────────────────────────

pub struct BirdringApp {
    pub chart: Sunburst,
    pub view: SunburstView,
    /// Text of the "selected datum" label, fed by the selection bus.
    pub selected: SelectedDatum,
    pub selection_rx: mpsc::Receiver<SelectionEvent>,
}

impl BirdringApp {
    /// Build the chart over the embedded year dataset.
    pub fn new(config: ChartConfig) -> Result<Self> {
        let data = birdring::data::year()?;
        let mut chart = Sunburst::new(&data, config)?;
        let selection_rx = chart.bus_mut().subscribe_channel();
        let view = SunburstView::new(&chart);
        Ok(Self {
            chart,
            view,
            selected: SelectedDatum::new(),
            selection_rx,
        })
    }

    /// Apply every selection published since the last frame.
    fn drain_selection(&mut self) {
        while let Ok(event) = self.selection_rx.try_recv() {
            self.selected.apply(&event);
        }
    }
}

impl eframe::App for BirdringApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_selection();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                self.draw_content(ui, ctx);
            });
    }
}
