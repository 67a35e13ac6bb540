//! Filter engine.
//!
//! Narrows one fetched page of records by the optional predicates of a
//! [`FilterCriteria`], newest first. The same engine backs listing,
//! update-target resolution, and delete-target resolution; callers differ
//! only in which predicates they populate and in the default limit.

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};

use crate::error::{NoteError, Result};
use crate::record::RawRecord;

/// Weekday names in store order, index 0 = Sunday.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Inclusive time-of-day window over zero-padded `HH:MM` strings.
///
/// The comparison is lexicographic, which is numerically correct only
/// because both sides are zero-padded. Callers must supply padded values;
/// the engine does not repair unpadded input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

/// Per-request narrowing criteria. Absent predicates are always-true; all
/// present predicates must hold (AND).
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Exact UTC calendar date, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Weekday name, Sunday..Saturday, case-insensitive. Any other
    /// non-empty value is a validation error, not a silent no-match.
    pub day_of_week: Option<String>,
    /// Inclusive window over the record's local time of day.
    pub time_range: Option<TimeRange>,
    /// Case-insensitive substring over the stored body blob.
    pub query: Option<String>,
    /// Cap on the result count after sorting. Absent means no cap for
    /// listing; resolvers default it to 1. Zero or negative is rejected.
    pub limit: Option<i64>,
}

/// Resolve a weekday name to its index, 0 = Sunday .. 6 = Saturday.
/// Matching is exact (no abbreviations) but case-insensitive.
pub fn weekday_index(name: &str) -> Result<u32> {
    WEEKDAY_NAMES
        .iter()
        .position(|known| known.eq_ignore_ascii_case(name))
        .map(|index| index as u32)
        .ok_or_else(|| NoteError::Validation(format!("unrecognized day of week '{name}'")))
}

/// Apply the criteria to one page of records: validate, narrow, sort newest
/// first (stable), truncate to the limit.
pub fn apply(mut records: Vec<RawRecord>, criteria: &FilterCriteria) -> Result<Vec<RawRecord>> {
    let weekday = criteria
        .day_of_week
        .as_deref()
        .filter(|name| !name.is_empty())
        .map(weekday_index)
        .transpose()?;
    if let Some(limit) = criteria.limit {
        if limit <= 0 {
            return Err(NoteError::Validation("limit must be positive".to_string()));
        }
    }

    records.retain(|record| matches(record, criteria, weekday));
    records.sort_by(|a, b| b.created_at_millis.cmp(&a.created_at_millis));
    if let Some(limit) = criteria.limit {
        records.truncate(limit as usize);
    }
    Ok(records)
}

fn matches(record: &RawRecord, criteria: &FilterCriteria, weekday: Option<u32>) -> bool {
    let Some(created) = Utc.timestamp_millis_opt(record.created_at_millis).single() else {
        return false;
    };

    if let Some(date) = criteria.date.as_deref().filter(|d| !d.is_empty()) {
        if created.format("%Y-%m-%d").to_string() != date {
            return false;
        }
    }

    if let Some(index) = weekday {
        if created.weekday().num_days_from_sunday() != index {
            return false;
        }
    }

    if let Some(range) = &criteria.time_range {
        // Time of day is rendered in host-local time, matching how the
        // notes were read back when they were taken.
        let local: DateTime<Local> = created.with_timezone(&Local);
        let hhmm = local.format("%H:%M").to_string();
        if hhmm.as_str() < range.start.as_str() || hhmm.as_str() > range.end.as_str() {
            return false;
        }
    }

    if let Some(query) = criteria.query.as_deref().filter(|q| !q.is_empty()) {
        if !record
            .body_blob
            .to_lowercase()
            .contains(&query.to_lowercase())
        {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::record::SummaryFields;
    use pretty_assertions::assert_eq;

    fn record_at_utc(id: &str, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> RawRecord {
        RawRecord {
            id: id.to_string(),
            created_at_millis: Utc
                .with_ymd_and_hms(y, mo, d, h, mi, 0)
                .unwrap()
                .timestamp_millis(),
            body_blob: codec::encode(&SummaryFields {
                title: format!("note {id}"),
                summary: "weekly sync".to_string(),
                author: "Ana".to_string(),
            }),
        }
    }

    fn record_at_local(id: &str, h: u32, mi: u32) -> RawRecord {
        RawRecord {
            id: id.to_string(),
            created_at_millis: Local
                .with_ymd_and_hms(2024, 3, 6, h, mi, 0)
                .unwrap()
                .timestamp_millis(),
            body_blob: String::new(),
        }
    }

    fn ids(records: &[RawRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn no_criteria_keeps_everything_newest_first() {
        let records = vec![
            record_at_utc("old", 2024, 3, 1, 9, 0),
            record_at_utc("new", 2024, 3, 3, 9, 0),
            record_at_utc("mid", 2024, 3, 2, 9, 0),
        ];
        let filtered = apply(records, &FilterCriteria::default()).unwrap();
        assert_eq!(ids(&filtered), vec!["new", "mid", "old"]);
    }

    #[test]
    fn date_filter_excludes_adjacent_days() {
        let records = vec![
            record_at_utc("before", 2024, 2, 29, 23, 59),
            record_at_utc("on", 2024, 3, 1, 0, 0),
            record_at_utc("after", 2024, 3, 2, 0, 0),
        ];
        let criteria = FilterCriteria {
            date: Some("2024-03-01".to_string()),
            ..Default::default()
        };
        let filtered = apply(records, &criteria).unwrap();
        assert_eq!(ids(&filtered), vec!["on"]);
    }

    #[test]
    fn day_of_week_filter_is_case_insensitive() {
        // 2024-03-04 was a Monday, 2024-03-05 a Tuesday.
        let records = vec![
            record_at_utc("monday", 2024, 3, 4, 10, 0),
            record_at_utc("tuesday", 2024, 3, 5, 10, 0),
        ];
        let criteria = FilterCriteria {
            day_of_week: Some("monday".to_string()),
            ..Default::default()
        };
        let filtered = apply(records, &criteria).unwrap();
        assert_eq!(ids(&filtered), vec!["monday"]);
    }

    #[test]
    fn unknown_day_of_week_is_a_validation_error() {
        let criteria = FilterCriteria {
            day_of_week: Some("funday".to_string()),
            ..Default::default()
        };
        let err = apply(vec![], &criteria).unwrap_err();
        assert!(matches!(err, NoteError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn abbreviated_day_names_are_rejected() {
        assert!(weekday_index("mon").is_err());
        assert_eq!(weekday_index("MONDAY").unwrap(), 1);
        assert_eq!(weekday_index("Sunday").unwrap(), 0);
        assert_eq!(weekday_index("saturday").unwrap(), 6);
    }

    #[test]
    fn time_range_window_is_inclusive() {
        let records = vec![
            record_at_local("early", 8, 59),
            record_at_local("start", 9, 0),
            record_at_local("inside", 9, 30),
            record_at_local("end", 10, 0),
            record_at_local("late", 10, 1),
        ];
        let criteria = FilterCriteria {
            time_range: Some(TimeRange {
                start: "09:00".to_string(),
                end: "10:00".to_string(),
            }),
            ..Default::default()
        };
        let filtered = apply(records, &criteria).unwrap();
        let mut got = ids(&filtered);
        got.sort_unstable();
        assert_eq!(got, vec!["end", "inside", "start"]);
    }

    #[test]
    fn query_matches_blob_case_insensitively() {
        let mut records = vec![
            record_at_utc("plain", 2024, 3, 4, 10, 0),
            record_at_utc("hit", 2024, 3, 5, 10, 0),
        ];
        records[1].body_blob = codec::encode(&SummaryFields {
            title: "Budget review".to_string(),
            summary: "spend is flat".to_string(),
            author: "Sam".to_string(),
        });
        let criteria = FilterCriteria {
            query: Some("BUDGET".to_string()),
            ..Default::default()
        };
        let filtered = apply(records, &criteria).unwrap();
        assert_eq!(ids(&filtered), vec!["hit"]);
    }

    #[test]
    fn limit_truncates_to_most_recent_after_sort() {
        let records = vec![
            record_at_utc("a", 2024, 3, 1, 9, 0),
            record_at_utc("b", 2024, 3, 2, 9, 0),
            record_at_utc("c", 2024, 3, 3, 9, 0),
            record_at_utc("d", 2024, 3, 4, 9, 0),
            record_at_utc("e", 2024, 3, 5, 9, 0),
        ];
        let criteria = FilterCriteria {
            limit: Some(2),
            ..Default::default()
        };
        let filtered = apply(records, &criteria).unwrap();
        assert_eq!(ids(&filtered), vec!["e", "d"]);
    }

    #[test]
    fn non_positive_limit_is_rejected() {
        for limit in [0, -1] {
            let criteria = FilterCriteria {
                limit: Some(limit),
                ..Default::default()
            };
            let err = apply(vec![], &criteria).unwrap_err();
            assert!(matches!(err, NoteError::Validation(_)), "limit {limit}");
        }
    }

    #[test]
    fn equal_timestamps_keep_original_relative_order() {
        let at = Utc
            .with_ymd_and_hms(2024, 3, 4, 12, 0, 0)
            .unwrap()
            .timestamp_millis();
        let records = vec![
            RawRecord {
                id: "first".to_string(),
                created_at_millis: at,
                body_blob: String::new(),
            },
            RawRecord {
                id: "second".to_string(),
                created_at_millis: at,
                body_blob: String::new(),
            },
        ];
        let filtered = apply(records, &FilterCriteria::default()).unwrap();
        assert_eq!(ids(&filtered), vec!["first", "second"]);
    }
}
