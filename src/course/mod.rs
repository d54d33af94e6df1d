pub mod consolidate;
pub use consolidate::{DotSplit, consolidate, split_dot};
pub mod course;
pub use course::{Course, total_dot};
pub mod interval;
pub use interval::{AdminInterval, CourseError};
