use chrono::{Duration, NaiveDate, Utc};
use tracing::{info, warn};

use gantt_timeline::io::load_timeline;
use gantt_timeline::model::{Event, Task, Timeline};
use gantt_timeline::ui::{self, toolbar::ToolbarAction, ChartView};
use gantt_timeline::ChartConfig;

/// Main application state.
pub struct GanttApp {
    chart: ChartView,
    config: ChartConfig,
    status_message: String,
}

impl GanttApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        ui::theme::apply_theme(&cc.egui_ctx);

        let config = ChartConfig::load();
        let today = Utc::now().date_naive();
        Self {
            chart: ChartView::new(Self::sample_timeline(today), config.clone(), today),
            config,
            status_message: "Ready".to_string(),
        }
    }

    /// Demonstration timeline around `today`.
    fn sample_timeline(today: NaiveDate) -> Timeline {
        let day = |offset: i64| today + Duration::days(offset);
        Timeline::new(
            vec![
                Task::new("kickoff", "Project kickoff", day(-20), day(-16))
                    .with_forecast_end(day(-17)),
                Task::new("requirements", "Requirements", day(-16), day(-4))
                    .with_forecast_end(day(-1))
                    .depends_on("kickoff"),
                Task::new("design", "UI design", day(-3), day(10))
                    .with_color(egui::Color32::from_rgb(128, 90, 213))
                    .depends_on("requirements"),
                Task::new("backend", "Backend", day(-3), day(18))
                    .with_forecast_end(day(24))
                    .depends_on("requirements"),
                Task::new("qa", "Testing", day(19), day(30))
                    .with_color(egui::Color32::from_rgb(221, 107, 32))
                    .depends_on("design")
                    .depends_on("backend"),
            ],
            vec![
                Event::new("Design review", day(4)),
                Event::new("Release", day(32)),
            ],
        )
    }

    fn open_timeline(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline", &["json"])
            .pick_file()
        else {
            return;
        };
        match load_timeline(&path) {
            Ok(timeline) => {
                let count = timeline.tasks.len();
                // Dropping the previous view detaches its controller.
                self.chart = ChartView::new(timeline, self.config.clone(), Utc::now().date_naive());
                self.status_message = format!("Loaded {} tasks from {}", count, path.display());
                info!(path = %path.display(), "timeline opened");
            }
            Err(e) => {
                warn!(error = %e, "could not open timeline");
                self.status_message = format!("Error loading: {e}");
            }
        }
    }
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.chart.controller_mut().set_today(Utc::now().date_naive());

        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::O)) {
            self.open_timeline();
        }

        let mut action = ToolbarAction::None;
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            action = ui::toolbar::show_toolbar(&self.chart, ui);
        });
        match action {
            ToolbarAction::Open => self.open_timeline(),
            ToolbarAction::FitToView => {
                let _ = self.chart.controller_mut().refit();
                self.status_message = "Zoom fitted to window".to_string();
            }
            ToolbarAction::None => {}
        }

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let controller = self.chart.controller();
                        ui.label(
                            egui::RichText::new(format!(
                                "Tasks: {}  ·  Events: {}",
                                controller.timeline().tasks.len(),
                                controller.timeline().events.len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            self.chart.show(ui);
        });
    }
}
