use eframe::egui;

mod app;
mod model;
mod registry;
mod ruler;
mod units;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_maximized(true),
        ..Default::default()
    };
    eframe::run_native(
        "Battlemat",
        native_options,
        Box::new(|cc| Ok(Box::new(app::MapApp::new(cc)))),
    )
}
