//! Pure geometry for one render pass.
//!
//! [`compute`] turns the timeline, the date ranges and the current zoom into a
//! [`ChartLayout`]: plain rectangles, polylines and label positions in chart
//! space (origin at the top-left of the plot, inside the padding). Nothing
//! here touches a drawing surface.

pub mod bars;
pub mod dependencies;
pub mod grid;
pub mod markers;

use chrono::NaiveDate;
use egui::Vec2;

pub use bars::{task_geometry, BarKind, BarSegment, SegmentStyle, TaskBar};
pub use dependencies::{dependency_path, dependency_paths, DependencyPath};
pub use grid::{grid_lines, GridLine, WeekLabel};
pub use markers::{event_markers, today_marker, EventMarker, Hitbox, MarkerLine};

use crate::config::ChartConfig;
use crate::model::date_math::diff_days;
use crate::model::{DateRange, DateRanges, Metrics, Timeline, ViewState};

/// Maps dates and rows to chart-space pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    /// Date at x = 0.
    pub origin: NaiveDate,
    pub metrics: Metrics,
    pub header_height: f32,
    pub padding: f32,
}

impl Scale {
    pub fn new(total: DateRange, metrics: Metrics, config: &ChartConfig) -> Self {
        Self {
            origin: total.start,
            metrics,
            header_height: config.header_height,
            padding: config.padding,
        }
    }

    /// Left edge of `date`'s day column.
    pub fn x(&self, date: NaiveDate) -> f32 {
        diff_days(self.origin, date) as f32 * self.metrics.day_width
    }

    /// Right edge of `date`'s day column, for inclusive end dates.
    pub fn x_after(&self, date: NaiveDate) -> f32 {
        (diff_days(self.origin, date) + 1) as f32 * self.metrics.day_width
    }

    pub fn row_top(&self, row: usize) -> f32 {
        self.header_height + row as f32 * self.metrics.row_height
    }

    pub fn row_center(&self, row: usize) -> f32 {
        self.row_top(row) + self.metrics.row_height / 2.0
    }

    /// Top of the bar inside `row`, centring it vertically.
    pub fn bar_top(&self, row: usize) -> f32 {
        self.row_top(row) + (self.metrics.row_height - self.metrics.bar_height) / 2.0
    }

    /// Bottom of the last row; full-height lines stop here.
    pub fn plot_bottom(&self) -> f32 {
        self.metrics.chart_height - self.padding * 2.0
    }
}

/// Everything the renderer needs for one frame, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    /// Full drawing size, padding included.
    pub size: Vec2,
    /// Translation from drawing space to chart space.
    pub offset: Vec2,
    pub metrics: Metrics,
    pub grid: Vec<GridLine>,
    pub bars: Vec<TaskBar>,
    pub dependencies: Vec<DependencyPath>,
    pub today: Option<MarkerLine>,
    pub events: Vec<EventMarker>,
    /// Horizontal scroll that brings the focus range into view.
    pub scroll_x: f32,
}

pub fn compute(
    timeline: &Timeline,
    ranges: &DateRanges,
    view: ViewState,
    today: NaiveDate,
    config: &ChartConfig,
) -> ChartLayout {
    let metrics = Metrics::new(view, ranges.total.days(), timeline.tasks.len(), config);
    let scale = Scale::new(ranges.total, metrics, config);

    let bars = timeline
        .tasks
        .iter()
        .enumerate()
        .map(|(row, task)| task_geometry(task, row, &scale, config))
        .collect();

    ChartLayout {
        size: Vec2::new(metrics.chart_width, metrics.chart_height),
        offset: Vec2::splat(config.padding),
        metrics,
        grid: grid_lines(ranges.total, &scale, config.min_label_spacing_pixels),
        bars,
        dependencies: dependency_paths(timeline, &scale, config),
        today: today_marker(ranges.total, today, &scale),
        events: event_markers(&timeline.events, ranges.total, &scale, config.event_hitbox_width),
        scroll_x: (scale.x(ranges.viewing.start) - config.scroll_lead_in).max(0.0),
    }
}
