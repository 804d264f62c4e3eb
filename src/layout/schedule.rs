use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::model::Goal;

use super::graph::DependencyGraph;

/// Projected duration of a goal in weeks, given the weekly capacity.
///
/// A capacity of zero or less substitutes a minimum of one week so no
/// caller ever divides by zero.
pub fn project_duration_weeks(estimate_hours: f64, weekly_work_hours: f64) -> f64 {
    if weekly_work_hours <= 0.0 {
        return 1.0;
    }
    (estimate_hours / weekly_work_hours).max(0.0)
}

/// Projected duration of a goal in days.
pub fn projected_duration_days(estimate_hours: f64, weekly_work_hours: f64) -> f64 {
    project_duration_weeks(estimate_hours, weekly_work_hours) * 7.0
}

/// Convert an hours offset into a calendar date by spreading the hours
/// across weeks of `weekly_work_hours` capacity. Rounds to whole days.
pub fn hours_offset_to_date(
    base: NaiveDate,
    hours_offset: f64,
    weekly_work_hours: f64,
) -> NaiveDate {
    if weekly_work_hours <= 0.0 {
        return base;
    }
    let days = (hours_offset / weekly_work_hours * 7.0).round() as i64;
    base + Duration::days(days)
}

/// Start offset in hours for every goal, propagated through the
/// dependency graph.
///
/// Goals are processed in `topological_order`, so each dependency's offset
/// is known before its dependents are visited: a goal starts at the max of
/// (dependency offset + dependency estimate) over its dependencies, or at
/// 0 when it has none. Dependency IDs that resolve to no known goal are
/// skipped with a warning.
pub fn dependency_start_offsets(
    goals: &[Goal],
    graph: &DependencyGraph,
) -> HashMap<String, f64> {
    let by_id: HashMap<&str, &Goal> = goals.iter().map(|g| (g.id.as_str(), g)).collect();
    let mut offsets: HashMap<String, f64> = HashMap::with_capacity(goals.len());

    for id in &graph.topological_order {
        let Some(goal) = by_id.get(id.as_str()) else {
            offsets.insert(id.clone(), 0.0);
            continue;
        };
        let mut start = 0.0f64;
        for dep_id in &goal.dependencies {
            let Some(dep) = by_id.get(dep_id.as_str()) else {
                tracing::warn!(goal = %goal.id, dependency = %dep_id,
                    "skipping unresolved dependency");
                continue;
            };
            // In a cyclic graph the order is the input order, so a
            // dependency may not be scheduled yet; it then counts as 0.
            let dep_start = offsets.get(dep_id.as_str()).copied().unwrap_or(0.0);
            start = start.max(dep_start + dep.estimate_hours.max(0.0));
        }
        offsets.insert(id.clone(), start);
    }

    // Defensive: every goal gets an offset even if it was missing from
    // the ordering.
    for goal in goals {
        offsets.entry(goal.id.clone()).or_insert(0.0);
    }

    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::graph::analyze_dependencies;
    use crate::model::Goal;

    fn goal(id: &str, deps: &[&str], hours: f64) -> Goal {
        let mut g = Goal::new(id, id, hours);
        g.dependencies = deps.iter().map(|d| d.to_string()).collect();
        g
    }

    #[test]
    fn chain_offsets_accumulate_dependency_estimates() {
        let goals = vec![
            goal("a", &[], 10.0),
            goal("b", &["a"], 5.0),
            goal("c", &["b"], 20.0),
        ];
        let graph = analyze_dependencies(&goals);
        let offsets = dependency_start_offsets(&goals, &graph);
        assert_eq!(offsets["a"], 0.0);
        assert_eq!(offsets["b"], 10.0);
        assert_eq!(offsets["c"], 15.0);
    }

    #[test]
    fn diamond_takes_the_latest_dependency() {
        let goals = vec![
            goal("a", &[], 10.0),
            goal("b", &["a"], 40.0),
            goal("c", &["a"], 5.0),
            goal("d", &["b", "c"], 1.0),
        ];
        let graph = analyze_dependencies(&goals);
        let offsets = dependency_start_offsets(&goals, &graph);
        assert_eq!(offsets["d"], 50.0);
    }

    #[test]
    fn unresolved_dependency_is_skipped() {
        let goals = vec![goal("a", &["ghost"], 10.0)];
        let graph = analyze_dependencies(&goals);
        let offsets = dependency_start_offsets(&goals, &graph);
        assert_eq!(offsets["a"], 0.0);
    }

    #[test]
    fn hours_offset_maps_capacity_weeks_to_days() {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        // One full capacity week is seven calendar days.
        assert_eq!(
            hours_offset_to_date(base, 10.0, 10.0),
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
        );
        // Zero capacity never divides; the base date comes back.
        assert_eq!(hours_offset_to_date(base, 25.0, 0.0), base);
    }

    #[test]
    fn zero_capacity_duration_floors_at_one_week() {
        assert_eq!(project_duration_weeks(30.0, 0.0), 1.0);
        assert_eq!(project_duration_weeks(30.0, -5.0), 1.0);
        assert_eq!(projected_duration_days(20.0, 10.0), 14.0);
    }
}
