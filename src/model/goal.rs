use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a goal, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    NotStarted,
    InProgress,
    Completed,
    Blocked,
    /// Any status string this crate does not recognize.
    #[serde(other)]
    Unknown,
}

impl Default for GoalStatus {
    fn default() -> Self {
        GoalStatus::NotStarted
    }
}

/// A unit of work owned by exactly one goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Estimated effort in hours; weights this task's share of the goal bar.
    #[serde(default)]
    pub estimate_hours: f64,
    /// Progress from 0 to 100; clamped to that range when consumed.
    #[serde(default)]
    pub progress_percentage: f64,
    /// Display color token for the rendering layer.
    #[serde(default)]
    pub status_color: String,
    #[serde(default, with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Create a new task with sensible defaults.
    pub fn new(id: impl Into<String>, title: impl Into<String>, estimate_hours: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            estimate_hours,
            progress_percentage: 0.0,
            status_color: String::new(),
            due_date: None,
        }
    }

    /// Weight of this task in proportional layout. Negative estimates count as zero.
    pub fn weight(&self) -> f64 {
        self.estimate_hours.max(0.0)
    }

    /// Progress as a fraction, clamped to [0, 1].
    pub fn clamped_progress(&self) -> f64 {
        (self.progress_percentage / 100.0).clamp(0.0, 1.0)
    }
}

/// A project milestone with estimated effort and dependency relationships
/// to other goals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: GoalStatus,
    /// Estimated effort in hours; converted to calendar time through the
    /// project's weekly work hours.
    #[serde(default)]
    pub estimate_hours: f64,
    #[serde(default, with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, with = "lenient_date")]
    pub created_at: Option<NaiveDate>,
    /// IDs of goals this goal must follow.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Goal {
    /// Create a new goal with sensible defaults.
    pub fn new(id: impl Into<String>, title: impl Into<String>, estimate_hours: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: GoalStatus::NotStarted,
            estimate_hours,
            start_date: None,
            end_date: None,
            created_at: None,
            dependencies: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// Total task weight, the denominator for proportional segment layout.
    pub fn total_task_hours(&self) -> f64 {
        self.tasks.iter().map(Task::weight).sum()
    }

    /// Estimate-weighted mean of task progress, as a fraction in [0, 1].
    /// A goal with no task weight reports 0.
    pub fn computed_progress(&self) -> f64 {
        let total = self.total_task_hours();
        if total <= 0.0 {
            return 0.0;
        }
        let weighted: f64 = self
            .tasks
            .iter()
            .map(|t| t.weight() * t.clamped_progress())
            .sum();
        (weighted / total).clamp(0.0, 1.0)
    }
}

/// Try parsing a date string with several common formats.
///
/// Full timestamps contribute their date part; anything unparseable is
/// treated as absent rather than an error.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y", "%d.%m.%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Serde helper for optional dates: accepts plain dates or timestamps,
/// maps malformed strings to `None`.
pub(crate) mod lenient_date {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(super::parse_date))
    }
}
