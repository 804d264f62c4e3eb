use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::model::{Task, TimeUnit};

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Canvas padding per side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 40.0,
            right: 40.0,
            top: 48.0,
            bottom: 24.0,
        }
    }
}

impl Padding {
    /// Horizontal extent available for bars.
    pub fn inner_width(&self, canvas_width: f32) -> f32 {
        canvas_width - self.left - self.right
    }
}

/// A horizontal slice of a goal bar owned by one task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSegment {
    pub task_id: String,
    pub title: String,
    pub x0: f32,
    pub x1: f32,
    /// Fractional progress in [0, 1].
    pub progress: f64,
    pub progress_percentage: f64,
    pub status_color: String,
    pub due_date: Option<NaiveDate>,
}

/// A labeled tick mark on the timeline header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub date: NaiveDate,
    pub x: f32,
    pub label: String,
}

/// Convert a date to an x-pixel position inside the padded canvas.
///
/// Linear interpolation over the timeline span, clamped to the canvas.
/// A non-positive span short-circuits to the left padding edge.
pub fn date_to_x(
    date: NaiveDate,
    timeline_start: NaiveDate,
    total_days: i64,
    canvas_width: f32,
    padding: &Padding,
) -> f32 {
    if total_days <= 0 {
        return padding.left;
    }
    let days = (date - timeline_start).num_days() as f32;
    let ratio = (days / total_days as f32).clamp(0.0, 1.0);
    padding.left + ratio * padding.inner_width(canvas_width)
}

/// Convert an x-pixel position back to a date, rounding to whole days.
pub fn x_to_date(
    x: f32,
    timeline_start: NaiveDate,
    total_days: i64,
    canvas_width: f32,
    padding: &Padding,
) -> NaiveDate {
    let inner = padding.inner_width(canvas_width);
    if total_days <= 0 || inner <= 0.0 {
        return timeline_start;
    }
    let ratio = ((x - padding.left) / inner).clamp(0.0, 1.0);
    let days = (ratio * total_days as f32).round() as i64;
    timeline_start + Duration::days(days)
}

/// Slice a goal bar `[x0, x1]` into contiguous per-task segments,
/// proportional to each task's share of the total task hours.
///
/// Produces nothing when the bar has no width or the tasks no weight.
/// Zero-weight tasks still appear, as zero-width slices, so segment order
/// always matches task order.
pub fn task_segments(x0: f32, x1: f32, tasks: &[Task]) -> Vec<TaskSegment> {
    let width = x1 - x0;
    let total_weight: f64 = tasks.iter().map(Task::weight).sum();
    if total_weight <= 0.0 || width <= 0.0 {
        return Vec::new();
    }

    let mut segments = Vec::with_capacity(tasks.len());
    let mut cumulative = 0.0f64;
    let mut left = x0;
    for task in tasks {
        cumulative += task.weight();
        // Slice boundaries come from the cumulative share so the last
        // segment lands exactly on x1.
        let right = x0 + (cumulative / total_weight) as f32 * width;
        segments.push(TaskSegment {
            task_id: task.id.clone(),
            title: task.title.clone(),
            x0: left,
            x1: right,
            progress: task.clamped_progress(),
            progress_percentage: task.progress_percentage.clamp(0.0, 100.0),
            status_color: task.status_color.clone(),
            due_date: task.due_date,
        });
        left = right;
    }
    segments
}

/// Orthogonal (L-shaped) arrow path for one dependency edge.
///
/// Leaves the source bar's right edge, runs right by the configured
/// horizontal offset (staggered per arrow index so overlapping arrows
/// separate), drops vertically to the target row, then runs into the
/// target bar's left edge.
pub fn arrow_path(
    from_x1: f32,
    from_y: f32,
    to_x0: f32,
    to_y: f32,
    index: usize,
    horizontal_offset: f32,
) -> Vec<Point> {
    let offset = horizontal_offset + (index % 3) as f32 * 10.0;
    let elbow_x = from_x1 + offset;
    vec![
        Point { x: from_x1, y: from_y },
        Point { x: elbow_x, y: from_y },
        Point { x: elbow_x, y: to_y },
        Point { x: to_x0, y: to_y },
    ]
}

/// Header tick marks across the span for the given display unit:
/// every day, every Monday, or every first of the month.
pub fn timeline_ticks(
    start: NaiveDate,
    end: NaiveDate,
    total_days: i64,
    unit: TimeUnit,
    canvas_width: f32,
    padding: &Padding,
) -> Vec<Tick> {
    let mut ticks = Vec::new();
    if end < start {
        return ticks;
    }

    let push = |date: NaiveDate, label: String, ticks: &mut Vec<Tick>| {
        let x = date_to_x(date, start, total_days, canvas_width, padding);
        ticks.push(Tick { date, x, label });
    };

    match unit {
        TimeUnit::Day => {
            let mut date = start;
            while date <= end {
                push(date, date.format("%d").to_string(), &mut ticks);
                date += Duration::days(1);
            }
        }
        TimeUnit::Week => {
            // First Monday on or after the span start.
            let offset = (7 - start.weekday().num_days_from_monday()) % 7;
            let mut date = start + Duration::days(offset as i64);
            while date <= end {
                push(date, date.format("W%V").to_string(), &mut ticks);
                date += Duration::days(7);
            }
        }
        TimeUnit::Month => {
            let mut date = if start.day() == 1 {
                start
            } else {
                next_month_start(start)
            };
            while date <= end {
                push(date, date.format("%b %Y").to_string(), &mut ticks);
                date = next_month_start(date);
            }
        }
    }
    ticks
}

fn next_month_start(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(date + Duration::days(31))
}
