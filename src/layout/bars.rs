use egui::{pos2, Color32, Rect, Rounding};

use super::Scale;
use crate::config::ChartConfig;
use crate::model::color::darken;
use crate::model::Task;

/// Brightness kept by the unused-slack segment.
const SLACK_DARKEN: f32 = 0.6;
const HATCH_SPACING: f32 = 6.0;
const FORECAST_OPACITY: f32 = 0.5;
const FORECAST_DASH: f32 = 4.0;
const FORECAST_GAP: f32 = 2.0;

/// Which of the three bar shapes a task produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BarKind {
    /// No forecast, or the forecast lands on the plan.
    Plan,
    /// Forecast before the planned end; the remainder is unused slack.
    FinishedEarly { split_x: f32 },
    /// Forecast after the planned end; the tail is projected overrun.
    Overrun { split_x: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentStyle {
    Solid,
    /// Darkened fill under a diagonal hatch.
    Slack { hatch_spacing: f32 },
    /// Translucent fill with a dashed outline in the task colour.
    Forecast {
        outline: Color32,
        dash: f32,
        gap: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSegment {
    pub rect: Rect,
    pub rounding: Rounding,
    pub fill: Color32,
    pub style: SegmentStyle,
}

/// All shapes belonging to one task row; hit-testing treats them as a group.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskBar {
    pub task_id: String,
    pub row: usize,
    pub kind: BarKind,
    pub segments: Vec<BarSegment>,
}

impl TaskBar {
    /// Union of the segment rectangles.
    pub fn bounds(&self) -> Rect {
        self.segments
            .iter()
            .fold(Rect::NOTHING, |acc, seg| acc.union(seg.rect))
    }
}

/// Bar geometry for `task` in `row`.
///
/// End offsets use the day after the date so the inclusive end day is
/// covered. Split segments share the exact split coordinate.
pub fn task_geometry(task: &Task, row: usize, scale: &Scale, config: &ChartConfig) -> TaskBar {
    let color = task.color.unwrap_or(config.default_task_color);
    let radius = config.corner_radius;
    let top = scale.bar_top(row);
    let bottom = top + scale.metrics.bar_height;
    let span = |x0: f32, x1: f32| Rect::from_min_max(pos2(x0, top), pos2(x1, bottom));

    let x_start = scale.x(task.start);
    let x_end = scale.x_after(task.end);
    // A forecast before the start still yields an all-slack bar.
    let x_forecast = task
        .forecast_end
        .map(|date| scale.x_after(date).max(x_start));

    let (kind, segments) = match x_forecast {
        Some(x_forecast) if x_forecast < x_end => (
            BarKind::FinishedEarly { split_x: x_forecast },
            vec![
                BarSegment {
                    rect: span(x_start, x_forecast),
                    rounding: left_rounded(radius),
                    fill: color,
                    style: SegmentStyle::Solid,
                },
                BarSegment {
                    rect: span(x_forecast, x_end),
                    rounding: right_rounded(radius),
                    fill: darken(color, SLACK_DARKEN),
                    style: SegmentStyle::Slack {
                        hatch_spacing: HATCH_SPACING,
                    },
                },
            ],
        ),
        Some(x_forecast) if x_forecast > x_end => (
            BarKind::Overrun { split_x: x_end },
            vec![
                BarSegment {
                    rect: span(x_start, x_end),
                    rounding: left_rounded(radius),
                    fill: color,
                    style: SegmentStyle::Solid,
                },
                BarSegment {
                    rect: span(x_end, x_forecast),
                    rounding: right_rounded(radius),
                    fill: color.gamma_multiply(FORECAST_OPACITY),
                    style: SegmentStyle::Forecast {
                        outline: color,
                        dash: FORECAST_DASH,
                        gap: FORECAST_GAP,
                    },
                },
            ],
        ),
        _ => (
            BarKind::Plan,
            vec![BarSegment {
                rect: span(x_start, x_end),
                rounding: Rounding::same(radius),
                fill: color,
                style: SegmentStyle::Solid,
            }],
        ),
    };

    TaskBar {
        task_id: task.id.clone(),
        row,
        kind,
        segments,
    }
}

fn left_rounded(radius: f32) -> Rounding {
    Rounding {
        nw: radius,
        sw: radius,
        ne: 0.0,
        se: 0.0,
    }
}

fn right_rounded(radius: f32) -> Rounding {
    Rounding {
        nw: 0.0,
        sw: 0.0,
        ne: radius,
        se: radius,
    }
}
