#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;

fn main() -> eframe::Result<()> {
    let _ = gantt_timeline::telemetry::init_default_tracing();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([640.0, 360.0])
            .with_title("Gantt Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "Gantt Timeline",
        options,
        Box::new(|cc| Ok(Box::new(app::GanttApp::new(cc)))),
    )
}
