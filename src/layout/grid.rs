use chrono::{Datelike, Duration, Weekday};
use egui::{pos2, Pos2};

use super::Scale;
use crate::model::date_math::week_number;
use crate::model::DateRange;

/// A vertical week boundary, optionally carrying its week label.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub x: f32,
    pub top: f32,
    pub bottom: f32,
    pub label: Option<WeekLabel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLabel {
    /// Left end of the text baseline.
    pub pos: Pos2,
    pub text: String,
}

/// One line per Monday in `total`.
///
/// Labels are thinned greedily from the left: a line gets a label only if it
/// sits at least `min_label_spacing` past the previous labelled line, so
/// labels never collide at any zoom level.
pub fn grid_lines(total: DateRange, scale: &Scale, min_label_spacing: f32) -> Vec<GridLine> {
    let mut last_label_x = f32::NEG_INFINITY;
    (0..=total.days())
        .map(|day| total.start + Duration::days(day))
        .filter(|date| date.weekday() == Weekday::Mon)
        .map(|date| {
            let x = scale.x(date);
            let label = (x - last_label_x >= min_label_spacing).then(|| {
                last_label_x = x;
                WeekLabel {
                    pos: pos2(x + 4.0, scale.header_height - 5.0),
                    text: format!("W{:02}", week_number(date)),
                }
            });
            GridLine {
                x,
                top: scale.header_height,
                bottom: scale.plot_bottom(),
                label,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{d, scale};
    use super::*;
    use approx::assert_relative_eq;

    fn total() -> DateRange {
        DateRange {
            start: d("2024-01-01"),
            end: d("2024-02-04"),
        }
    }

    #[test]
    fn one_line_per_monday() {
        let lines = grid_lines(total(), &scale(1), 0.0);
        let xs: Vec<f32> = lines.iter().map(|l| l.x).collect();
        assert_eq!(xs, vec![0.0, 14.0, 28.0, 42.0, 56.0]);
        assert!(lines.iter().all(|l| l.top == 20.0 && l.bottom == 40.0));
    }

    #[test]
    fn labels_use_iso_week_numbers() {
        let lines = grid_lines(total(), &scale(1), 0.0);
        let labels: Vec<&str> = lines
            .iter()
            .filter_map(|l| l.label.as_ref().map(|w| w.text.as_str()))
            .collect();
        assert_eq!(labels, vec!["W01", "W02", "W03", "W04", "W05"]);
        let first = lines[0].label.as_ref().unwrap();
        assert_relative_eq!(first.pos.x, 4.0);
        assert_relative_eq!(first.pos.y, 15.0);
    }

    #[test]
    fn labels_are_thinned_to_the_minimum_spacing() {
        // Lines every 14px; with 30px spacing only every third line is labelled.
        let lines = grid_lines(total(), &scale(1), 30.0);
        let labelled: Vec<f32> = lines
            .iter()
            .filter(|l| l.label.is_some())
            .map(|l| l.x)
            .collect();
        assert_eq!(labelled, vec![0.0, 42.0]);
        for pair in labelled.windows(2) {
            assert!(pair[1] - pair[0] >= 30.0);
        }
    }
}
