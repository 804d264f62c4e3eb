use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

use crate::model::{Goal, TimelineWindow};

use super::schedule::{hours_offset_to_date, projected_duration_days};

/// Default visible span, in days, when neither goals nor the caller
/// window provide any dates.
const EMPTY_SPAN_DAYS: i64 = 28;

/// The overall date span of the visualized timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimelineBounds {
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Base date that dependency-projected offsets are anchored to.
///
/// Chain: caller window start, earliest explicit goal start, earliest
/// creation date, today. Only fully date-free inputs reach the wall clock.
pub fn schedule_base(goals: &[Goal], window: &TimelineWindow) -> NaiveDate {
    window
        .start_date
        .or_else(|| goals.iter().filter_map(|g| g.start_date).min())
        .or_else(|| goals.iter().filter_map(|g| g.created_at).min())
        .unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Effective start of a goal: explicit start date, else the
/// dependency-projected start for goals with dependencies, else the
/// creation date, else the schedule base.
pub fn effective_start(
    goal: &Goal,
    base: NaiveDate,
    offsets: &HashMap<String, f64>,
    weekly_work_hours: f64,
) -> NaiveDate {
    if let Some(start) = goal.start_date {
        return start;
    }
    if !goal.dependencies.is_empty() {
        if let Some(&offset) = offsets.get(goal.id.as_str()) {
            return hours_offset_to_date(base, offset, weekly_work_hours);
        }
    }
    goal.created_at.unwrap_or(base)
}

/// Effective end of a goal: explicit end date, else the effective start
/// plus the capacity-projected duration.
pub fn effective_end(goal: &Goal, start: NaiveDate, weekly_work_hours: f64) -> NaiveDate {
    if let Some(end) = goal.end_date {
        return end;
    }
    let days = projected_duration_days(goal.estimate_hours, weekly_work_hours).round() as i64;
    start + Duration::days(days)
}

/// Min/max span across all goals, seeded by the caller-supplied window.
pub fn compute_bounds(
    goals: &[Goal],
    offsets: &HashMap<String, f64>,
    weekly_work_hours: f64,
    window: &TimelineWindow,
) -> TimelineBounds {
    let base = schedule_base(goals, window);
    let mut start = window.start_date;
    let mut end = window.end_date;

    for goal in goals {
        let goal_start = effective_start(goal, base, offsets, weekly_work_hours);
        let goal_end = effective_end(goal, goal_start, weekly_work_hours);
        start = Some(start.map_or(goal_start, |s| s.min(goal_start)));
        end = Some(end.map_or(goal_end, |e| e.max(goal_end)));
    }

    let start = start.unwrap_or(base);
    let end = end.unwrap_or(start + Duration::days(EMPTY_SPAN_DAYS)).max(start);
    TimelineBounds { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Goal, TimelineWindow};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn explicit_dates_win_over_everything() {
        let mut goal = Goal::new("a", "A", 10.0);
        goal.start_date = Some(date(2024, 2, 1));
        goal.end_date = Some(date(2024, 2, 20));
        goal.created_at = Some(date(2024, 1, 1));
        let bounds = compute_bounds(
            &[goal],
            &HashMap::new(),
            10.0,
            &TimelineWindow::default(),
        );
        assert_eq!(bounds, TimelineBounds { start: date(2024, 2, 1), end: date(2024, 2, 20) });
    }

    #[test]
    fn created_at_anchors_goals_without_dates_or_dependencies() {
        let mut goal = Goal::new("a", "A", 20.0);
        goal.created_at = Some(date(2024, 3, 1));
        let bounds = compute_bounds(
            &[goal],
            &HashMap::new(),
            10.0,
            &TimelineWindow::default(),
        );
        // 20h at 10h/week is two weeks.
        assert_eq!(bounds.start, date(2024, 3, 1));
        assert_eq!(bounds.end, date(2024, 3, 15));
    }

    #[test]
    fn dependency_projection_places_dependent_goals() {
        let mut b = Goal::new("b", "B", 5.0);
        b.dependencies = vec!["a".to_string()];
        let offsets: HashMap<String, f64> =
            [("a".to_string(), 0.0), ("b".to_string(), 10.0)].into();
        let start = effective_start(&b, date(2024, 1, 1), &offsets, 10.0);
        assert_eq!(start, date(2024, 1, 8));
    }

    #[test]
    fn window_seeds_the_bounds() {
        let mut goal = Goal::new("a", "A", 10.0);
        goal.start_date = Some(date(2024, 5, 10));
        goal.end_date = Some(date(2024, 5, 12));
        let window = TimelineWindow {
            start_date: Some(date(2024, 5, 1)),
            end_date: Some(date(2024, 6, 1)),
            ..Default::default()
        };
        let bounds = compute_bounds(&[goal], &HashMap::new(), 10.0, &window);
        assert_eq!(bounds, TimelineBounds { start: date(2024, 5, 1), end: date(2024, 6, 1) });
    }

    #[test]
    fn zero_capacity_projects_the_one_week_minimum() {
        let mut goal = Goal::new("a", "A", 40.0);
        goal.created_at = Some(date(2024, 1, 1));
        let bounds = compute_bounds(
            &[goal],
            &HashMap::new(),
            0.0,
            &TimelineWindow::default(),
        );
        assert_eq!(bounds.end, date(2024, 1, 8));
    }

    #[test]
    fn inverted_window_clamps_to_zero_span() {
        let window = TimelineWindow {
            start_date: Some(date(2024, 5, 10)),
            end_date: Some(date(2024, 5, 1)),
            ..Default::default()
        };
        let bounds = compute_bounds(&[], &HashMap::new(), 10.0, &window);
        assert_eq!(bounds.start, date(2024, 5, 10));
        assert_eq!(bounds.end, date(2024, 5, 10));
        assert_eq!(bounds.total_days(), 0);
    }
}
