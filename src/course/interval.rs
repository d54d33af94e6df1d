use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CourseError {
    #[error("Administration interval starts on {start}, after it ends on {end}.")]
    InvalidInterval { start: NaiveDate, end: NaiveDate },
}

/// A closed administration window for a single drug, held at whole-day
/// granularity.
///
/// Both bounds are inclusive and `start <= end` always holds; a reversed
/// window is rejected at construction rather than silently swapped. Callers
/// with timestamped exports should go through
/// [`AdminInterval::from_datetimes`], which truncates both instants to their
/// calendar date before any comparison happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AdminInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl AdminInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CourseError> {
        if start > end {
            return Err(CourseError::InvalidInterval { start, end });
        }
        Ok(AdminInterval { start, end })
    }

    pub fn from_datetimes(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, CourseError> {
        Self::new(start.date(), end.date())
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive day count: a single-day administration counts as 1.
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// True when the two windows overlap or sit on consecutive calendar days.
    ///
    /// An administration that stops one day and resumes the very next day
    /// continues the same course; a gap of two or more days starts a new one.
    /// This predicate is the only merge rule the consolidator uses.
    pub fn connected(&self, other: &AdminInterval) -> bool {
        let overlaps = self.start <= other.end && other.start <= self.end;
        overlaps
            || self.end.succ_opt() == Some(other.start)
            || other.end.succ_opt() == Some(self.start)
    }
}
