//! Character progression: point schedule, constraint solver and builds.

mod build;
mod schedule;
mod solver;

pub use build::{Build, BuildError};
pub use schedule::{Level, PointSchedule, Points, ScheduleError};
pub use solver::{BuildConstraintSolver, InvalidLevelError};
