use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::{AnyValue, TimeUnit};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Coerces a cell to a calendar date, truncating any time-of-day part.
///
/// Excel exports arrive as millisecond datetimes, CSV exports as strings;
/// both are accepted. Returns None for nulls and for values no format
/// matches.
pub(crate) fn date_from_any(value: &AnyValue) -> Option<NaiveDate> {
    match value {
        AnyValue::Date(days) => {
            DateTime::from_timestamp(i64::from(*days) * 86_400, 0).map(|dt| dt.date_naive())
        }
        AnyValue::Datetime(ts, unit, _) => timestamp_to_date(*ts, *unit),
        AnyValue::DatetimeOwned(ts, unit, _) => timestamp_to_date(*ts, *unit),
        AnyValue::String(raw) => parse_date_str(raw),
        AnyValue::StringOwned(raw) => parse_date_str(raw.as_str()),
        _ => None,
    }
}

fn timestamp_to_date(ts: i64, unit: TimeUnit) -> Option<NaiveDate> {
    let datetime = match unit {
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(ts),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(ts),
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(ts)),
    }?;
    Some(datetime.date_naive())
}

/// Accepts the date shapes seen in hospital exports: ISO dates, ISO
/// datetimes, and US-style month/day/year with or without a time.
pub(crate) fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.date());
        }
    }
    None
}

/// Stringifies a grouping-key cell (encounter number, drug category).
///
/// Numeric encounter identifiers come out of Excel as floats; whole floats
/// are rendered without the trailing `.0` so they join against string-typed
/// sources.
pub(crate) fn key_from_any(value: &AnyValue) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(raw) => Some((*raw).to_string()),
        AnyValue::StringOwned(raw) => Some(raw.to_string()),
        AnyValue::Float64(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
        AnyValue::Float32(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
        other => Some(other.to_string()),
    }
}
