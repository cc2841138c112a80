use egui::{Align2, Color32, Painter, Pos2, Rect, Rounding, Shape, Stroke, Vec2};

use super::theme;
use crate::render::Surface;

/// Draws onto an egui painter; drawing-space coordinates are offset by the
/// top-left of the allocated chart rect.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn origin(&self) -> Vec2 {
        self.rect.min.to_vec2()
    }

    fn place(&self, points: &[Pos2]) -> Vec<Pos2> {
        points.iter().map(|p| *p + self.origin()).collect()
    }
}

impl Surface for EguiSurface<'_> {
    /// egui repaints from scratch every frame, so clearing only has to lay
    /// down the background.
    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, theme::BG_DARK);
    }

    fn fill_rect(&mut self, rect: Rect, rounding: Rounding, fill: Color32) {
        self.painter
            .rect_filled(rect.translate(self.origin()), rounding, fill);
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter
            .line_segment([from + self.origin(), to + self.origin()], stroke);
    }

    fn polyline(&mut self, points: &[Pos2], stroke: Stroke) {
        self.painter.add(Shape::line(self.place(points), stroke));
    }

    fn dashed_polyline(&mut self, points: &[Pos2], stroke: Stroke, dash: f32, gap: f32) {
        self.painter
            .extend(Shape::dashed_line(&self.place(points), stroke, dash, gap));
    }

    fn polygon(&mut self, points: Vec<Pos2>, fill: Color32) {
        self.painter.add(Shape::convex_polygon(
            self.place(&points),
            fill,
            Stroke::NONE,
        ));
    }

    fn text(&mut self, pos: Pos2, text: &str, color: Color32) {
        self.painter.text(
            pos + self.origin(),
            Align2::LEFT_BOTTOM,
            text,
            theme::font_header(),
            color,
        );
    }
}
