//! Merge-on-update policy.
//!
//! Caller-supplied fields win only when non-empty; an explicit empty string
//! leaves the stored value unchanged. "Merge-on-empty" is the contract the
//! update tool documents, not an accident.

use crate::record::SummaryFields;

/// Partial field set supplied by an update caller. `None` and `Some("")`
/// are equivalent: both mean "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct SummaryPatch {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub author: Option<String>,
}

/// Reconcile previously stored fields with a caller patch, field by field.
pub fn merge(previous: SummaryFields, patch: &SummaryPatch) -> SummaryFields {
    SummaryFields {
        title: pick(patch.title.as_deref(), previous.title),
        summary: pick(patch.summary.as_deref(), previous.summary),
        author: pick(patch.author.as_deref(), previous.author),
    }
}

fn pick(candidate: Option<&str>, previous: String) -> String {
    match candidate {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => previous,
    }
}
