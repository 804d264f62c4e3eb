pub mod bounds;
pub mod engine;
pub mod geometry;
pub mod graph;
pub mod schedule;

pub use bounds::{compute_bounds, TimelineBounds};
pub use engine::{
    Arrow, Dimensions, GoalLayout, LayoutConfig, LayoutEngine, LayoutModel, TimelineSpan,
};
pub use geometry::{Padding, Point, TaskSegment, Tick};
pub use graph::{analyze_dependencies, DependencyGraph};
pub use schedule::dependency_start_offsets;
