mod app;
mod io;
mod model;

use app::DressingApp;
use dressing_room::Config;

fn main() -> eframe::Result<()> {
    dressing_room::init_logging(std::env::var_os("DRESSING_VERBOSE").is_some());

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "config unreadable, using defaults");
            Config::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width as f32, config.window_height as f32])
            .with_resizable(false),
        ..Default::default()
    };
    eframe::run_native(
        "Dressing Room",
        options,
        Box::new(|_cc| Box::new(DressingApp::new(config))),
    )
}
