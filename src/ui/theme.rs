use egui::style::ScrollStyle;
use egui::{Color32, FontId, Rounding, Shadow, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 48);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const TODAY_LINE: Color32 = Color32::from_rgb(240, 75, 75);
pub const GRID_LINE: Color32 = Color32::from_rgb(44, 46, 58);
pub const DEPENDENCY_LINE: Color32 = Color32::from_rgb(229, 62, 62);
pub const EVENT_LINE: Color32 = Color32::from_rgb(236, 201, 75);

/// Diagonal hatch laid over unused-slack segments.
pub const SLACK_HATCH: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 90);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const GRID_STROKE: f32 = 0.5;
pub const DEPENDENCY_STROKE: f32 = 1.5;
pub const ARROW_SIZE: f32 = 6.0;
pub const TODAY_STROKE: f32 = 2.0;
pub const EVENT_STROKE: f32 = 1.0;
pub const HATCH_STROKE: f32 = 2.0;
pub const STATUS_BAR_HEIGHT: f32 = 22.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.5)
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

/// Dark visuals for the chart window. The hover tooltip is an egui popup, so
/// popup fill and shadow are tuned here too.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_DARK;
    visuals.faint_bg_color = BG_HEADER;

    visuals.window_fill = BG_HEADER;
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.window_rounding = Rounding::same(4.0);
    visuals.popup_shadow = Shadow::NONE;

    let widgets = &mut visuals.widgets;
    widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    for state in [&mut widgets.inactive, &mut widgets.hovered, &mut widgets.active] {
        state.rounding = Rounding::same(3.0);
    }
    widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 4.0);
        // The chart scrolls both ways; keep its bars visible.
        style.spacing.scroll = ScrollStyle::solid();
    });
}
