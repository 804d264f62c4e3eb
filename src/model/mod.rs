pub mod goal;
pub mod project;

pub use goal::{Goal, GoalStatus, Task};
pub use project::{Project, TimeUnit, TimelineData, TimelineWindow};
