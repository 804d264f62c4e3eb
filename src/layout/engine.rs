use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Goal, GoalStatus, TimelineData};

use super::bounds::{compute_bounds, effective_end, effective_start, schedule_base};
use super::geometry::{
    arrow_path, date_to_x, task_segments, timeline_ticks, Padding, Point, TaskSegment, Tick,
};
use super::graph::analyze_dependencies;
use super::schedule::dependency_start_offsets;

/// Immutable configuration for a layout engine.
///
/// Passed in whole at construction; a pass never mutates it, so identical
/// input data always yields an identical layout.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub row_height: f32,
    pub goal_bar_height: f32,
    pub padding: Padding,
    /// Display color tokens cycled across goal rows.
    pub palette: Vec<String>,
    pub arrow_stroke_width: f32,
    pub arrow_marker_size: f32,
    /// How far an arrow runs right of its source bar before turning.
    pub arrow_horizontal_offset: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1280.0,
            canvas_height: 720.0,
            row_height: 32.0,
            goal_bar_height: 24.0,
            padding: Padding::default(),
            palette: vec![
                "#4285F4".to_string(),
                "#34A853".to_string(),
                "#AB47BC".to_string(),
                "#FB8C00".to_string(),
                "#03A9F4".to_string(),
                "#E53935".to_string(),
                "#00BCD4".to_string(),
                "#FFC107".to_string(),
            ],
            arrow_stroke_width: 1.5,
            arrow_marker_size: 6.0,
            arrow_horizontal_offset: 20.0,
        }
    }
}

/// A goal positioned on the canvas.
#[derive(Debug, Clone, Serialize)]
pub struct GoalLayout {
    pub id: String,
    pub title: String,
    /// Row index in display (topological) order.
    pub row: usize,
    pub x0: f32,
    pub x1: f32,
    /// Estimate-weighted task progress, in [0, 1].
    pub progress: f64,
    pub status: GoalStatus,
    /// Palette token assigned to this goal's bar.
    pub color: String,
    pub segments: Vec<TaskSegment>,
}

/// An orthogonal dependency arrow between two goal bars.
#[derive(Debug, Clone, Serialize)]
pub struct Arrow {
    pub id: String,
    pub from_goal_id: String,
    pub to_goal_id: String,
    pub path: Vec<Point>,
    /// False whenever the dependency graph contains any cycle.
    pub is_valid: bool,
}

/// The date span backing the x axis.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineSpan {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i64,
    pub pixels_per_day: f32,
}

/// Canvas measurements the rendering layer draws against.
#[derive(Debug, Clone, Serialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub row_height: f32,
    pub goal_bar_height: f32,
    pub padding: Padding,
}

/// The computed geometric description of one timeline: positioned goals,
/// dependency arrows, header ticks and canvas dimensions.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutModel {
    pub goals: Vec<GoalLayout>,
    pub arrows: Vec<Arrow>,
    pub ticks: Vec<Tick>,
    pub timeline: TimelineSpan,
    pub dimensions: Dimensions,
    pub has_cycle: bool,
}

/// Stateless layout engine: one configuration, any number of passes.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Run one full layout pass over a snapshot of project data.
    ///
    /// Deterministic for identical input; never panics on degenerate data
    /// (empty goal lists, missing dates, zero estimates, cycles).
    pub fn compute_layout(&self, data: &TimelineData) -> LayoutModel {
        let cfg = &self.config;
        let goals = &data.goals;
        let weekly = data.project.weekly_work_hours;

        let graph = analyze_dependencies(goals);
        let offsets = dependency_start_offsets(goals, &graph);
        let bounds = compute_bounds(goals, &offsets, weekly, &data.timeline);
        let base = schedule_base(goals, &data.timeline);
        let total_days = bounds.total_days();

        // Display order: topological, with any goal missing from the
        // ordering appended in input order.
        let order_index = graph.order_index();
        let mut display: Vec<&Goal> = goals.iter().collect();
        display.sort_by_key(|g| order_index.get(g.id.as_str()).copied().unwrap_or(usize::MAX));

        let mut layouts = Vec::with_capacity(display.len());
        for (row, goal) in display.iter().enumerate() {
            let start = effective_start(goal, base, &offsets, weekly);
            let end = effective_end(goal, start, weekly);
            let x0 = date_to_x(start, bounds.start, total_days, cfg.canvas_width, &cfg.padding);
            let x1 = date_to_x(end, bounds.start, total_days, cfg.canvas_width, &cfg.padding)
                .max(x0);
            let color = if cfg.palette.is_empty() {
                String::new()
            } else {
                cfg.palette[row % cfg.palette.len()].clone()
            };
            layouts.push(GoalLayout {
                id: goal.id.clone(),
                title: goal.title.clone(),
                row,
                x0,
                x1,
                progress: goal.computed_progress(),
                status: goal.status,
                color,
                segments: task_segments(x0, x1, &goal.tasks),
            });
        }

        let arrows = self.compute_arrows(&graph.edges, graph.has_cycle, &layouts);
        let ticks = timeline_ticks(
            bounds.start,
            bounds.end,
            total_days,
            data.timeline.time_unit,
            cfg.canvas_width,
            &cfg.padding,
        );

        let rows_height =
            layouts.len() as f32 * cfg.row_height + cfg.padding.top + cfg.padding.bottom;
        let pixels_per_day = if total_days > 0 {
            cfg.padding.inner_width(cfg.canvas_width) / total_days as f32
        } else {
            0.0
        };

        tracing::debug!(
            goals = layouts.len(),
            arrows = arrows.len(),
            has_cycle = graph.has_cycle,
            total_days,
            "layout pass complete"
        );

        LayoutModel {
            goals: layouts,
            arrows,
            ticks,
            timeline: TimelineSpan {
                start_date: bounds.start,
                end_date: bounds.end,
                total_days,
                pixels_per_day,
            },
            dimensions: Dimensions {
                width: cfg.canvas_width,
                height: cfg.canvas_height.max(rows_height),
                row_height: cfg.row_height,
                goal_bar_height: cfg.goal_bar_height,
                padding: cfg.padding,
            },
            has_cycle: graph.has_cycle,
        }
    }

    /// Vertical center of a row's goal bar.
    fn row_center(&self, row: usize) -> f32 {
        self.config.padding.top + row as f32 * self.config.row_height
            + self.config.row_height / 2.0
    }

    fn compute_arrows(
        &self,
        edges: &[(String, String)],
        has_cycle: bool,
        layouts: &[GoalLayout],
    ) -> Vec<Arrow> {
        let by_id: HashMap<&str, &GoalLayout> =
            layouts.iter().map(|g| (g.id.as_str(), g)).collect();

        let mut arrows = Vec::with_capacity(edges.len());
        for (index, (from, to)) in edges.iter().enumerate() {
            let (Some(source), Some(target)) =
                (by_id.get(from.as_str()), by_id.get(to.as_str()))
            else {
                continue;
            };
            arrows.push(Arrow {
                id: format!("{from}->{to}"),
                from_goal_id: from.clone(),
                to_goal_id: to.clone(),
                path: arrow_path(
                    source.x1,
                    self.row_center(source.row),
                    target.x0,
                    self.row_center(target.row),
                    index,
                    self.config.arrow_horizontal_offset,
                ),
                is_valid: !has_cycle,
            });
        }
        arrows
    }
}
