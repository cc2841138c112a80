use egui::{Color32, Pos2, Rect, Rounding, Stroke};

use super::{Layer, Surface};

/// One primitive as handed to a [`Surface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Layer(Layer),
    Rect {
        rect: Rect,
        rounding: Rounding,
        fill: Color32,
    },
    Line {
        from: Pos2,
        to: Pos2,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Pos2>,
        stroke: Stroke,
    },
    Dashed {
        points: Vec<Pos2>,
        stroke: Stroke,
        dash: f32,
        gap: f32,
    },
    Polygon {
        points: Vec<Pos2>,
        fill: Color32,
    },
    Text {
        pos: Pos2,
        text: String,
        color: Color32,
    },
}

/// Headless surface that records what it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    /// Number of times the surface was cleared.
    pub clears: usize,
}

impl RecordingSurface {
    /// Layers in the order they were opened.
    pub fn layers(&self) -> Vec<Layer> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Layer(layer) => Some(*layer),
                _ => None,
            })
            .collect()
    }

    /// Count the commands inside `layer` matching `pred`.
    pub fn in_layer(&self, layer: Layer, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        let mut current = None;
        let mut count = 0;
        for command in &self.commands {
            match command {
                DrawCommand::Layer(l) => current = Some(*l),
                other if current == Some(layer) && pred(other) => count += 1,
                _ => {}
            }
        }
        count
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn begin_layer(&mut self, layer: Layer) {
        self.commands.push(DrawCommand::Layer(layer));
    }

    fn fill_rect(&mut self, rect: Rect, rounding: Rounding, fill: Color32) {
        self.commands.push(DrawCommand::Rect {
            rect,
            rounding,
            fill,
        });
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn polyline(&mut self, points: &[Pos2], stroke: Stroke) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            stroke,
        });
    }

    fn dashed_polyline(&mut self, points: &[Pos2], stroke: Stroke, dash: f32, gap: f32) {
        self.commands.push(DrawCommand::Dashed {
            points: points.to_vec(),
            stroke,
            dash,
            gap,
        });
    }

    fn polygon(&mut self, points: Vec<Pos2>, fill: Color32) {
        self.commands.push(DrawCommand::Polygon { points, fill });
    }

    fn text(&mut self, pos: Pos2, text: &str, color: Color32) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.to_string(),
            color,
        });
    }
}
