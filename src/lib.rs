//! Deterministic timeline layout engine.
//!
//! Converts a project snapshot (goals, tasks, dependency lists) into the
//! geometry of a Gantt-style timeline: bar extents, proportional task
//! segments, orthogonal dependency arrows and header ticks. The engine is
//! pure and synchronous; fetching data and drawing the result belong to
//! the caller.
//!
//! ```
//! use timeline_layout::layout::LayoutEngine;
//! use timeline_layout::model::{Goal, Project, TimelineData};
//!
//! let mut data = TimelineData::new(Project::new("p1", "Thesis", 10.0));
//! let mut write = Goal::new("write", "Write chapters", 40.0);
//! write.dependencies = vec!["research".to_string()];
//! data.goals = vec![Goal::new("research", "Research", 20.0), write];
//!
//! let layout = LayoutEngine::default().compute_layout(&data);
//! assert_eq!(layout.goals.len(), 2);
//! assert_eq!(layout.arrows.len(), 1);
//! ```

pub mod io;
pub mod layout;
pub mod model;

pub use layout::{LayoutConfig, LayoutEngine, LayoutModel};
pub use model::TimelineData;
