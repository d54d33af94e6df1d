use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One continuous treatment episode: a maximal cluster of administration
/// windows merged under the one-day-gap rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Earliest administration start in the cluster.
    pub start: NaiveDate,
    /// Latest administration end in the cluster.
    pub end: NaiveDate,
    /// 1-based rank within the group, by ascending start date.
    pub ordinal: u32,
    /// Inclusive days of therapy covered by the course.
    pub dot: i64,
}

/// Days of therapy summed over a group's courses. Zero for an empty group.
pub fn total_dot(courses: &[Course]) -> i64 {
    courses.iter().map(|course| course.dot).sum()
}
