use egui::{menu, RichText, Ui};

use super::theme;
use super::ChartView;

/// What the user picked in the toolbar this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    Open,
    FitToView,
}

/// Render the top menu bar.
pub fn show_toolbar(chart: &ChartView, ui: &mut Ui) -> ToolbarAction {
    let mut action = ToolbarAction::None;
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_status()), |ui| {
            if ui.button("  Open timeline...").clicked() {
                action = ToolbarAction::Open;
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_status()), |ui| {
            if ui.button("  Fit to window").clicked() {
                action = ToolbarAction::FitToView;
                ui.close_menu();
            }
            ui.separator();
            ui.label(RichText::new("Ctrl+Scroll to zoom").small().weak());
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!("Zoom: {:.0}%", chart.controller().zoom_percent()))
                    .font(theme::font_status())
                    .color(theme::TEXT_DIM),
            );
        });
    });
    action
}
