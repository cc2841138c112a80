use chrono::NaiveDate;
use egui::Pos2;

use super::Scale;
use crate::model::{DateRange, Event};

/// A full-height vertical line at `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerLine {
    pub x: f32,
    pub top: f32,
    pub bottom: f32,
}

impl MarkerLine {
    fn at(x: f32, scale: &Scale) -> Self {
        Self {
            x,
            top: scale.header_height,
            bottom: scale.plot_bottom(),
        }
    }
}

/// Invisible, wider twin of a marker line used for pointer hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub line: MarkerLine,
    pub width: f32,
}

impl Hitbox {
    pub fn contains(&self, pos: Pos2) -> bool {
        (pos.x - self.line.x).abs() <= self.width / 2.0
            && pos.y >= self.line.top
            && pos.y <= self.line.bottom
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventMarker {
    pub line: MarkerLine,
    pub hitbox: Hitbox,
    pub label: String,
}

/// The "today" line, if today lies inside the total range.
pub fn today_marker(total: DateRange, today: NaiveDate, scale: &Scale) -> Option<MarkerLine> {
    total
        .contains(today)
        .then(|| MarkerLine::at(scale.x(today), scale))
}

/// One marker per event inside the total range, in input order.
pub fn event_markers(
    events: &[Event],
    total: DateRange,
    scale: &Scale,
    hitbox_width: f32,
) -> Vec<EventMarker> {
    events
        .iter()
        .filter(|event| total.contains(event.date))
        .map(|event| {
            let line = MarkerLine::at(scale.x(event.date), scale);
            EventMarker {
                line,
                hitbox: Hitbox {
                    line,
                    width: hitbox_width,
                },
                label: event.name.clone(),
            }
        })
        .collect()
}
