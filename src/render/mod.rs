//! Materialises a [`ChartLayout`] onto a drawing surface.
//!
//! The renderer keeps no state between frames: every call clears the surface
//! and draws the whole layout again, layer by layer, so later layers sit on
//! top of earlier ones.

mod recording;

pub use recording::{DrawCommand, RecordingSurface};

use egui::{pos2, Color32, Pos2, Rect, Rounding, Stroke, Vec2};

use crate::layout::{BarSegment, ChartLayout, MarkerLine, SegmentStyle};
use crate::ui::theme;

/// Draw layers, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Grid,
    Bars,
    Dependencies,
    Today,
    Events,
}

impl Layer {
    pub const ORDER: [Layer; 5] = [
        Layer::Grid,
        Layer::Bars,
        Layer::Dependencies,
        Layer::Today,
        Layer::Events,
    ];
}

/// The host drawing surface. Coordinates are in drawing space: the top-left
/// of the full chart, padding included.
pub trait Surface {
    /// Drop everything drawn so far.
    fn clear(&mut self);

    fn begin_layer(&mut self, _layer: Layer) {}

    fn fill_rect(&mut self, rect: Rect, rounding: Rounding, fill: Color32);

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);

    fn polyline(&mut self, points: &[Pos2], stroke: Stroke);

    fn dashed_polyline(&mut self, points: &[Pos2], stroke: Stroke, dash: f32, gap: f32);

    fn polygon(&mut self, points: Vec<Pos2>, fill: Color32);

    fn text(&mut self, pos: Pos2, text: &str, color: Color32);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub grid: Color32,
    pub label: Color32,
    pub dependency: Color32,
    pub today: Color32,
    pub event: Color32,
    pub hatch: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid: theme::GRID_LINE,
            label: theme::TEXT_SECONDARY,
            dependency: theme::DEPENDENCY_LINE,
            today: theme::TODAY_LINE,
            event: theme::EVENT_LINE,
            hatch: theme::SLACK_HATCH,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    pub palette: Palette,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn draw<S: Surface + ?Sized>(&self, layout: &ChartLayout, surface: &mut S) {
        let offset = layout.offset;
        surface.clear();

        surface.begin_layer(Layer::Grid);
        let grid_stroke = Stroke::new(theme::GRID_STROKE, self.palette.grid);
        for line in &layout.grid {
            surface.line(
                pos2(line.x, line.top) + offset,
                pos2(line.x, line.bottom) + offset,
                grid_stroke,
            );
            if let Some(label) = &line.label {
                surface.text(label.pos + offset, &label.text, self.palette.label);
            }
        }

        surface.begin_layer(Layer::Bars);
        for bar in &layout.bars {
            for segment in &bar.segments {
                self.draw_segment(segment, offset, surface);
            }
        }

        surface.begin_layer(Layer::Dependencies);
        let dep_stroke = Stroke::new(theme::DEPENDENCY_STROKE, self.palette.dependency);
        for dep in &layout.dependencies {
            let points: Vec<Pos2> = dep.points.iter().map(|p| *p + offset).collect();
            surface.polyline(&points, dep_stroke);
            if let Some(head) = arrow_head(&points, theme::ARROW_SIZE) {
                surface.polygon(head, self.palette.dependency);
            }
        }

        surface.begin_layer(Layer::Today);
        if let Some(today) = &layout.today {
            draw_marker(today, offset, Stroke::new(theme::TODAY_STROKE, self.palette.today), surface);
        }

        surface.begin_layer(Layer::Events);
        let event_stroke = Stroke::new(theme::EVENT_STROKE, self.palette.event);
        for event in &layout.events {
            draw_marker(&event.line, offset, event_stroke, surface);
        }
    }

    fn draw_segment<S: Surface + ?Sized>(&self, segment: &BarSegment, offset: Vec2, surface: &mut S) {
        let rect = segment.rect.translate(offset);
        surface.fill_rect(rect, segment.rounding, segment.fill);
        match segment.style {
            SegmentStyle::Solid => {}
            SegmentStyle::Slack { hatch_spacing } => {
                let stroke = Stroke::new(theme::HATCH_STROKE, self.palette.hatch);
                for [from, to] in hatch_lines(rect, hatch_spacing) {
                    surface.line(from, to, stroke);
                }
            }
            SegmentStyle::Forecast { outline, dash, gap } => {
                let outline_points = [
                    rect.left_top(),
                    rect.right_top(),
                    rect.right_bottom(),
                    rect.left_bottom(),
                    rect.left_top(),
                ];
                surface.dashed_polyline(&outline_points, Stroke::new(1.0, outline), dash, gap);
            }
        }
    }
}

fn draw_marker<S: Surface + ?Sized>(marker: &MarkerLine, offset: Vec2, stroke: Stroke, surface: &mut S) {
    surface.line(
        pos2(marker.x, marker.top) + offset,
        pos2(marker.x, marker.bottom) + offset,
        stroke,
    );
}

/// 45° hatch lines (rising to the right) clipped to `rect`, `spacing` apart
/// measured perpendicular to the lines.
pub fn hatch_lines(rect: Rect, spacing: f32) -> Vec<[Pos2; 2]> {
    if spacing <= 0.0 || rect.width() <= 0.0 || rect.height() <= 0.0 {
        return Vec::new();
    }
    // Each line is x + y = c.
    let step = spacing * std::f32::consts::SQRT_2;
    let first = rect.min.x + rect.min.y;
    let last = rect.max.x + rect.max.y;
    let mut lines = Vec::new();
    let mut c = first + step / 2.0;
    while c < last {
        let x_a = rect.min.x.max(c - rect.max.y);
        let x_b = rect.max.x.min(c - rect.min.y);
        if x_a < x_b {
            lines.push([pos2(x_a, c - x_a), pos2(x_b, c - x_b)]);
        }
        c += step;
    }
    lines
}

/// Filled triangle whose tip is the polyline's last point.
pub fn arrow_head(points: &[Pos2], size: f32) -> Option<Vec<Pos2>> {
    let [.., from, tip] = points else {
        return None;
    };
    let delta = *tip - *from;
    if delta.length() <= f32::EPSILON {
        return None;
    }
    let dir = delta.normalized();
    let base = *tip - dir * size;
    let half = dir.rot90() * (size / 2.0);
    Some(vec![*tip, base + half, base - half])
}
