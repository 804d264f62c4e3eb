use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::goal::Goal;

/// Controls what scale the timeline header ticks use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Day,
    Week,
    Month,
}

impl Default for TimeUnit {
    fn default() -> Self {
        TimeUnit::Week
    }
}

/// Project metadata relevant to layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    /// Capacity figure (hours/week) used to convert effort estimates into
    /// calendar durations.
    #[serde(default)]
    pub weekly_work_hours: f64,
}

impl Project {
    pub fn new(id: impl Into<String>, title: impl Into<String>, weekly_work_hours: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            weekly_work_hours,
        }
    }
}

/// Caller-supplied fallback window for the visualized timeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineWindow {
    #[serde(default, with = "super::goal::lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "super::goal::lenient_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub time_unit: TimeUnit,
}

/// The full input snapshot a layout pass consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineData {
    pub project: Project,
    #[serde(default)]
    pub timeline: TimelineWindow,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl TimelineData {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            timeline: TimelineWindow::default(),
            goals: Vec::new(),
        }
    }
}
