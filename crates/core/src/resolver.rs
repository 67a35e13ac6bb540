//! Candidate resolution.
//!
//! Turns ambiguous selection input into concrete record identifiers by
//! running the filter engine over an already-fetched page. The explicit-id
//! fast path (no fetch, no filter) is handled by the operations layer
//! before these functions are reached.

use crate::error::{NoteError, Result};
use crate::filter::{self, FilterCriteria};
use crate::record::RawRecord;

/// Resolve the single record an update should act on: query-only criteria,
/// newest match wins. Date/day/time predicates are not accepted for update
/// lookup.
pub fn resolve_update_candidate(records: Vec<RawRecord>, query: &str) -> Result<String> {
    let criteria = FilterCriteria {
        query: Some(query.to_string()),
        limit: Some(1),
        ..Default::default()
    };
    let matched = filter::apply(records, &criteria)?;
    matched
        .into_iter()
        .next()
        .map(|record| record.id)
        .ok_or_else(|| NoteError::NotFound(format!("no summary note matches '{query}'")))
}

/// Resolve the records a delete may act on, newest first. The limit
/// defaults to 1 when the caller left it unset; the delete operation acts
/// on the first candidate only.
pub fn resolve_delete_candidates(
    records: Vec<RawRecord>,
    criteria: &FilterCriteria,
) -> Result<Vec<String>> {
    let mut criteria = criteria.clone();
    if criteria.limit.is_none() {
        criteria.limit = Some(1);
    }
    let matched = filter::apply(records, &criteria)?;
    if matched.is_empty() {
        return Err(NoteError::NotFound(
            "no summary notes match the given filters".to_string(),
        ));
    }
    Ok(matched.into_iter().map(|record| record.id).collect())
}
