mod app;

use eframe::egui;

use app::BirdringApp;
use birdring::ChartConfig;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = ChartConfig::default();
    let side = config.width;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("birdring")
            .with_inner_size([side, side + 40.0]),
        ..Default::default()
    };

    eframe::run_native(
        "birdring",
        options,
        Box::new(move |_cc| {
            let app = BirdringApp::new(config).map_err(|e| {
                log::error!("failed to build chart: {}", e);
                e
            })?;
            Ok(Box::new(app))
        }),
    )
}
