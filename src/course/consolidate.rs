use crate::course::course::Course;
use crate::course::interval::AdminInterval;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Merges one group's administration windows into treatment courses.
///
/// The intervals are sorted by `(start, end)` and swept once: an interval
/// whose start falls on or before the day after the running cluster's end
/// extends the cluster, anything later closes it. This partitions the input
/// exactly as connected components under [`AdminInterval::connected`] would,
/// without materializing a node per calendar day, so the cost stays
/// `O(n log n)` in the number of intervals rather than the days they span.
///
/// Duplicate and fully nested intervals are valid input and fold into their
/// surrounding cluster. An empty input yields an empty vec. Because of the
/// up-front sort, the result is identical for any ordering of the same
/// intervals.
pub fn consolidate(intervals: &[AdminInterval]) -> Vec<Course> {
    let mut sorted = intervals.to_vec();
    sorted.sort_unstable();

    let mut courses: Vec<Course> = Vec::new();
    let mut cluster: Option<(NaiveDate, NaiveDate)> = None;

    for interval in &sorted {
        match cluster {
            Some((cur_start, cur_end)) => {
                let extends = cur_end
                    .succ_opt()
                    .is_none_or(|next_day| interval.start() <= next_day);
                if extends {
                    cluster = Some((cur_start, cur_end.max(interval.end())));
                } else {
                    courses.push(close_cluster(cur_start, cur_end, courses.len()));
                    cluster = Some((interval.start(), interval.end()));
                }
            }
            None => cluster = Some((interval.start(), interval.end())),
        }
    }

    if let Some((start, end)) = cluster {
        courses.push(close_cluster(start, end, courses.len()));
    }

    courses
}

fn close_cluster(start: NaiveDate, end: NaiveDate, already_emitted: usize) -> Course {
    Course {
        start,
        end,
        ordinal: already_emitted as u32 + 1,
        dot: (end - start).num_days() + 1,
    }
}

/// Summed raw day counts of a group's intervals on either side of a
/// reference date. A bucket stays `None` unless at least one interval
/// contributes to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotSplit {
    pub before: Option<i64>,
    pub after: Option<i64>,
}

/// Splits a group's summed days of therapy around `index_date`.
///
/// The split runs over the raw intervals, not the consolidated courses: an
/// interval counts entirely toward `before` when it starts before the index
/// date and entirely toward `after` otherwise.
pub fn split_dot(intervals: &[AdminInterval], index_date: NaiveDate) -> DotSplit {
    let mut split = DotSplit::default();
    for interval in intervals {
        let bucket = if interval.start() < index_date {
            &mut split.before
        } else {
            &mut split.after
        };
        *bucket = Some(bucket.unwrap_or(0) + interval.day_count());
    }
    split
}
