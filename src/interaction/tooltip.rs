use chrono::NaiveDate;
use egui::Pos2;

use crate::model::{ForecastStatus, Task};

/// What the tooltip shows for the hovered element.
#[derive(Debug, Clone, PartialEq)]
pub enum TooltipContent {
    Task {
        name: String,
        start: NaiveDate,
        planned_end: NaiveDate,
        forecast: Option<(NaiveDate, ForecastStatus)>,
    },
    Event {
        name: String,
    },
}

impl TooltipContent {
    pub fn for_task(task: &Task) -> Self {
        TooltipContent::Task {
            name: task.name.clone(),
            start: task.start,
            planned_end: task.end,
            forecast: task.forecast_end.zip(task.forecast_status()),
        }
    }

    pub fn for_event(name: &str) -> Self {
        TooltipContent::Event {
            name: name.to_string(),
        }
    }

    /// HTML fragment for hosts that display the tooltip as markup.
    /// User-supplied names are escaped.
    pub fn to_html(&self) -> String {
        match self {
            TooltipContent::Task {
                name,
                start,
                planned_end,
                forecast,
            } => {
                let mut html = format!(
                    "<strong>{}</strong><br>Start: {}<br>Planned end: {}",
                    escape_html(name),
                    format_day(*start),
                    format_day(*planned_end),
                );
                if let Some((forecast_end, status)) = forecast {
                    html.push_str(&format!(
                        "<hr><em>Forecast end: {} ({})</em>",
                        format_day(*forecast_end),
                        status.label()
                    ));
                }
                html
            }
            TooltipContent::Event { name } => {
                format!("<strong>Event:</strong> {}", escape_html(name))
            }
        }
    }
}

/// Day and short month, e.g. `5 Jan`.
pub fn format_day(date: NaiveDate) -> String {
    date.format("%-d %b").to_string()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Tooltip state exposed to the host: content, visibility and screen position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tooltip {
    pub content: Option<TooltipContent>,
    pub position: Pos2,
}

impl Tooltip {
    pub fn is_visible(&self) -> bool {
        self.content.is_some()
    }

    pub fn opacity(&self) -> f32 {
        if self.is_visible() {
            1.0
        } else {
            0.0
        }
    }

    /// Markup for the current content; empty when hidden.
    pub fn html(&self) -> String {
        self.content
            .as_ref()
            .map(TooltipContent::to_html)
            .unwrap_or_default()
    }

    pub fn hide(&mut self) {
        self.content = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::date_math::parse_date;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn task_without_forecast() {
        let task = Task::new("t1", "Build", d("2024-01-01"), d("2024-01-05"));
        assert_eq!(
            TooltipContent::for_task(&task).to_html(),
            "<strong>Build</strong><br>Start: 1 Jan<br>Planned end: 5 Jan"
        );
    }

    #[test]
    fn forecast_line_carries_status() {
        let base = Task::new("t1", "Build", d("2024-01-01"), d("2024-01-05"));

        let early = TooltipContent::for_task(&base.clone().with_forecast_end(d("2024-01-03")));
        assert!(early
            .to_html()
            .ends_with("<hr><em>Forecast end: 3 Jan (out of schedule)</em>"));

        let late = TooltipContent::for_task(&base.clone().with_forecast_end(d("2024-01-12")));
        assert!(late.to_html().contains("Forecast end: 12 Jan (on track)"));

        let same = TooltipContent::for_task(&base.with_forecast_end(d("2024-01-05")));
        assert!(same.to_html().contains("(on time)"));
    }

    #[test]
    fn names_are_escaped() {
        let html = TooltipContent::for_event("<b>R&D</b>").to_html();
        assert_eq!(html, "<strong>Event:</strong> &lt;b&gt;R&amp;D&lt;/b&gt;");
    }

    #[test]
    fn hidden_tooltip_is_transparent_and_empty() {
        let mut tooltip = Tooltip {
            content: Some(TooltipContent::for_event("Review")),
            position: Pos2::new(10.0, 10.0),
        };
        assert_eq!(tooltip.opacity(), 1.0);
        tooltip.hide();
        assert_eq!(tooltip.opacity(), 0.0);
        assert!(tooltip.html().is_empty());
    }
}
