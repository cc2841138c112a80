use std::collections::HashMap;

use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};

use super::color::hex_color_opt;
use super::date_math::{iso_date, iso_date_opt};
use crate::error::GanttError;

/// A single task row on the timeline. Read-only once handed to the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(with = "iso_date")]
    pub start: NaiveDate,
    /// Planned end (inclusive).
    #[serde(with = "iso_date")]
    pub end: NaiveDate,
    /// Projected completion, when it differs from the plan.
    #[serde(default, with = "iso_date_opt", alias = "forecastEnd")]
    pub forecast_end: Option<NaiveDate>,
    #[serde(default, with = "hex_color_opt")]
    pub color: Option<Color32>,
    /// Ids of the tasks this one waits on.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start,
            end,
            forecast_end: None,
            color: None,
            dependencies: Vec::new(),
        }
    }

    pub fn with_forecast_end(mut self, forecast_end: NaiveDate) -> Self {
        self.forecast_end = Some(forecast_end);
        self
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn depends_on(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    /// How the forecast compares with the planned end, if there is one.
    pub fn forecast_status(&self) -> Option<ForecastStatus> {
        self.forecast_end.map(|forecast| match forecast.cmp(&self.end) {
            std::cmp::Ordering::Less => ForecastStatus::OutOfSchedule,
            std::cmp::Ordering::Greater => ForecastStatus::OnTrack,
            std::cmp::Ordering::Equal => ForecastStatus::OnTime,
        })
    }
}

/// Tooltip status for a task with a forecast.
///
/// An earlier forecast reads "out of schedule" and a later one "on track".
/// The stakeholders asked for this mapping explicitly; keep it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastStatus {
    OutOfSchedule,
    OnTrack,
    OnTime,
}

impl ForecastStatus {
    pub fn label(self) -> &'static str {
        match self {
            ForecastStatus::OutOfSchedule => "out of schedule",
            ForecastStatus::OnTrack => "on track",
            ForecastStatus::OnTime => "on time",
        }
    }
}

/// A dated marker drawn across the whole chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
}

impl Event {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
        }
    }
}

/// The ordered task rows and events shown by one chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Timeline {
    pub fn new(tasks: Vec<Task>, events: Vec<Event>) -> Self {
        Self { tasks, events }
    }

    /// Row index by task id. The first row wins if an id repeats.
    pub fn row_index(&self) -> HashMap<&str, usize> {
        let mut index = HashMap::with_capacity(self.tasks.len());
        for (row, task) in self.tasks.iter().enumerate() {
            index.entry(task.id.as_str()).or_insert(row);
        }
        index
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Every dependency that points at a task not in this timeline.
    pub fn dangling_dependencies(&self) -> Vec<GanttError> {
        let index = self.row_index();
        self.tasks
            .iter()
            .flat_map(|task| {
                task.dependencies
                    .iter()
                    .filter(|dep| !index.contains_key(dep.as_str()))
                    .map(|dep| GanttError::DanglingDependency {
                        task: task.id.clone(),
                        dependency: dep.clone(),
                    })
            })
            .collect()
    }
}
