//! Date ranges, zoom and the pixel metrics derived from them.
//!
//! Everything here is a plain value: the interaction controller owns the
//! authoritative copies and replaces them wholesale on every change.

use chrono::{Duration, NaiveDate, TimeDelta};
use tracing::{debug, warn};

use super::date_math::{align_to_week_end, align_to_week_start, diff_days};
use super::task::Timeline;
use crate::config::ChartConfig;
use crate::error::{GanttError, GanttResult};

/// Multiplicative zoom applied to the base pixel units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub zoom_x: f32,
    pub zoom_y: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewState {
    pub const IDENTITY: Self = Self {
        zoom_x: 1.0,
        zoom_y: 1.0,
    };

    /// Apply the same zoom delta on both axes, clamped to the configured limits.
    pub fn zoomed_by(self, delta: f32, config: &ChartConfig) -> Self {
        let clamp = |z: f32| (z + delta).min(config.zoom_max).max(config.zoom_min);
        Self {
            zoom_x: clamp(self.zoom_x),
            zoom_y: clamp(self.zoom_y),
        }
    }
}

/// A week-aligned span: starts on a Monday, ends on a Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Widen `[min, max]` to whole weeks plus one spare week on each side.
    pub fn padded(min: NaiveDate, max: NaiveDate) -> Self {
        Self {
            start: align_to_week_start(min) - Duration::weeks(1),
            end: align_to_week_end(max) + Duration::weeks(1),
        }
    }

    pub fn days(&self) -> i64 {
        diff_days(self.start, self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The two spans a chart works with.
///
/// `total` covers every task, forecast and event date plus today and drives
/// the grid. `viewing` covers plan dates and the focus window after today and
/// drives fit-zoom and the initial scroll. Events only widen `total`, so
/// `total` is not guaranteed to enclose `viewing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRanges {
    pub total: DateRange,
    pub viewing: DateRange,
}

pub fn compute_ranges(timeline: &Timeline, today: NaiveDate, config: &ChartConfig) -> DateRanges {
    let all_dates = timeline
        .tasks
        .iter()
        .flat_map(|t| [Some(t.start), Some(t.end), t.forecast_end])
        .flatten()
        .chain(timeline.events.iter().map(|e| e.date));
    let (total_min, total_max) = min_max(all_dates).unwrap_or((today, today));

    let plan_dates = timeline.tasks.iter().flat_map(|t| [t.start, t.end]);
    let (plan_min, plan_max) = min_max(plan_dates).unwrap_or((today, today));
    let focus_end = focus_end(today, config.focus_period_in_days);

    let ranges = DateRanges {
        total: DateRange::padded(total_min, total_max.max(today)),
        viewing: DateRange::padded(plan_min.min(today), plan_max.max(focus_end)),
    };
    debug!(
        total_start = %ranges.total.start,
        total_end = %ranges.total.end,
        viewing_start = %ranges.viewing.start,
        viewing_end = %ranges.viewing.end,
        "computed date ranges"
    );
    ranges
}

/// `today` plus the focus window; an out-of-range window collapses to `today`.
fn focus_end(today: NaiveDate, days: i64) -> NaiveDate {
    TimeDelta::try_days(days)
        .and_then(|delta| today.checked_add_signed(delta))
        .unwrap_or_else(|| {
            warn!(focus_period_in_days = days, "focus period out of range, ignoring it");
            today
        })
}

fn min_max(dates: impl Iterator<Item = NaiveDate>) -> Option<(NaiveDate, NaiveDate)> {
    dates.fold(None, |acc, date| match acc {
        None => Some((date, date)),
        Some((lo, hi)) => Some((lo.min(date), hi.max(date))),
    })
}

/// Size of the scrollable area hosting the chart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn validate(self) -> GanttResult<Self> {
        if self.width > 0.0 && self.height > 0.0 {
            Ok(self)
        } else {
            Err(GanttError::DegenerateViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Zoom that makes the focus span fill the viewport width and all rows fill
/// its height, never below `zoom_min`. A degenerate viewport yields identity.
pub fn fit_zoom(
    viewport: Viewport,
    viewing_days: i64,
    task_count: usize,
    config: &ChartConfig,
) -> ViewState {
    let viewport = match viewport.validate() {
        Ok(viewport) => viewport,
        Err(e) => {
            debug!(error = %e, "fit zoom falling back to identity");
            return ViewState::IDENTITY;
        }
    };

    let unzoomed_width = viewing_days as f32 * config.day_width_base;
    let zoom_x = if unzoomed_width > 0.0 {
        ((viewport.width - config.padding * 2.0) / unzoomed_width).max(config.zoom_min)
    } else {
        1.0
    };

    let unzoomed_height = task_count as f32 * config.row_height_base + config.header_height;
    let zoom_y = if unzoomed_height > 0.0 {
        ((viewport.height - config.padding * 2.0) / unzoomed_height).max(config.zoom_min)
    } else {
        1.0
    };

    ViewState { zoom_x, zoom_y }
}

/// Pixel sizes for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub day_width: f32,
    pub row_height: f32,
    pub bar_height: f32,
    /// Full drawing width including padding.
    pub chart_width: f32,
    /// Full drawing height including padding.
    pub chart_height: f32,
}

impl Metrics {
    pub fn new(view: ViewState, total_days: i64, task_count: usize, config: &ChartConfig) -> Self {
        let day_width = config.day_width_base * view.zoom_x;
        let row_height = config.row_height_base * view.zoom_y;
        Self {
            day_width,
            row_height,
            bar_height: config.bar_height_base * view.zoom_y,
            chart_width: total_days as f32 * day_width + config.padding * 2.0,
            chart_height: task_count as f32 * row_height
                + config.header_height
                + config.padding * 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::date_math::parse_date;
    use crate::model::task::{Event, Task};
    use approx::assert_relative_eq;
    use chrono::{Datelike, Weekday};

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn ranges_are_week_aligned_and_padded() {
        let timeline = Timeline::new(
            vec![Task::new("t1", "A", d("2024-01-03"), d("2024-01-10"))],
            Vec::new(),
        );
        let ranges = compute_ranges(&timeline, d("2024-01-05"), &ChartConfig::default());

        assert_eq!(ranges.total.start, d("2023-12-25"));
        assert_eq!(ranges.total.end, d("2024-01-21"));
        assert_eq!(ranges.total.start.weekday(), Weekday::Mon);
        assert_eq!(ranges.total.end.weekday(), Weekday::Sun);

        // Focus reaches 15 days past today: 2024-01-20 (Sat) -> Sun 21st + 1 week.
        assert_eq!(ranges.viewing.start, d("2023-12-25"));
        assert_eq!(ranges.viewing.end, d("2024-01-28"));
    }

    #[test]
    fn events_and_forecasts_only_widen_total() {
        let timeline = Timeline::new(
            vec![Task::new("t1", "A", d("2024-03-04"), d("2024-03-08"))
                .with_forecast_end(d("2024-04-20"))],
            vec![Event::new("Kickoff", d("2024-01-15"))],
        );
        let today = d("2024-03-06");
        let ranges = compute_ranges(&timeline, today, &ChartConfig::default());

        assert_eq!(ranges.total.start, d("2024-01-08"));
        assert_eq!(ranges.total.end, d("2024-04-28"));
        assert_eq!(ranges.viewing.start, d("2024-02-26"));
        assert_eq!(ranges.viewing.end, d("2024-03-31"));
    }

    #[test]
    fn total_reaches_today_when_tasks_are_in_the_past() {
        let timeline = Timeline::new(
            vec![Task::new("t1", "A", d("2024-01-01"), d("2024-01-05"))],
            Vec::new(),
        );
        let ranges = compute_ranges(&timeline, d("2024-06-12"), &ChartConfig::default());
        assert!(ranges.total.contains(d("2024-06-12")));
        assert_eq!(ranges.total.start, d("2023-12-25"));
    }

    #[test]
    fn empty_timeline_anchors_on_today() {
        let today = d("2024-05-15");
        let ranges = compute_ranges(&Timeline::default(), today, &ChartConfig::default());
        assert_eq!(ranges.total, DateRange::padded(today, today));
        assert!(ranges.total.contains(today));
        assert!(ranges.viewing.contains(today + Duration::days(15)));
    }

    #[test]
    fn fit_zoom_fills_the_viewport() {
        let config = ChartConfig::default();
        // 70 days * 2px = 140px, (740 - 40) / 140 = 5.
        // 4 rows * 20 + 20 = 100px, (240 - 40) / 100 = 2.
        let view = fit_zoom(Viewport::new(740.0, 240.0), 70, 4, &config);
        assert_relative_eq!(view.zoom_x, 5.0);
        assert_relative_eq!(view.zoom_y, 2.0);
    }

    #[test]
    fn fit_zoom_never_goes_below_minimum() {
        let config = ChartConfig::default();
        let view = fit_zoom(Viewport::new(50.0, 41.0), 3650, 500, &config);
        assert_relative_eq!(view.zoom_x, config.zoom_min);
        assert_relative_eq!(view.zoom_y, config.zoom_min);
    }

    #[test]
    fn degenerate_viewport_gives_identity() {
        let config = ChartConfig::default();
        assert_eq!(fit_zoom(Viewport::new(0.0, 0.0), 70, 4, &config), ViewState::IDENTITY);
        assert_eq!(fit_zoom(Viewport::new(800.0, -1.0), 70, 4, &config), ViewState::IDENTITY);
        assert!(matches!(
            Viewport::new(0.0, 10.0).validate(),
            Err(GanttError::DegenerateViewport { .. })
        ));
    }

    #[test]
    fn zoom_is_clamped_both_ways() {
        let config = ChartConfig::default();
        let view = ViewState { zoom_x: 4.95, zoom_y: 1.0 }.zoomed_by(0.1, &config);
        assert_relative_eq!(view.zoom_x, 5.0);
        assert_relative_eq!(view.zoom_y, 1.1);

        let view = ViewState { zoom_x: 0.25, zoom_y: 0.2 }.zoomed_by(-0.1, &config);
        assert_relative_eq!(view.zoom_x, 0.2);
        assert_relative_eq!(view.zoom_y, 0.2);
    }

    #[test]
    fn metrics_scale_with_zoom() {
        let config = ChartConfig::default();
        let metrics = Metrics::new(ViewState { zoom_x: 2.0, zoom_y: 0.5 }, 28, 3, &config);
        assert_relative_eq!(metrics.day_width, 4.0);
        assert_relative_eq!(metrics.row_height, 10.0);
        assert_relative_eq!(metrics.bar_height, 7.5);
        assert_relative_eq!(metrics.chart_width, 28.0 * 4.0 + 40.0);
        assert_relative_eq!(metrics.chart_height, 30.0 + 20.0 + 40.0);
    }

    #[test]
    fn oversized_focus_period_falls_back_to_today() {
        let config = ChartConfig::from_json(r#"{"focus_period_in_days": 9000000000000000}"#).unwrap();
        let ranges = compute_ranges(&Timeline::default(), d("2024-01-01"), &config);
        assert_eq!(ranges.viewing, DateRange::padded(d("2024-01-01"), d("2024-01-01")));
        assert!(ranges.viewing.contains(d("2024-01-01")));
    }
}
