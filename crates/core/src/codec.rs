//! Body-blob codec.
//!
//! A note is persisted as one free-text blob of exactly three labelled
//! lines, in fixed order:
//!
//! ```text
//! Title: {title}
//! Summary: {summary}
//! Author: {author}
//! ```
//!
//! Decoding is lenient on purpose: a blob missing a label line yields an
//! empty string for that field, and unrecognized lines are ignored. The
//! update path's merge-on-empty semantics depends on "absent field = empty
//! string, not failure" — do not tighten this into a parse error.

use crate::record::SummaryFields;

const TITLE_PREFIX: &str = "Title: ";
const SUMMARY_PREFIX: &str = "Summary: ";
const AUTHOR_PREFIX: &str = "Author: ";

/// Render the three fields into the stored blob form.
///
/// Field values are taken as-is; a value containing a newline shifts the
/// following lines out of their labels and is only recovered leniently.
pub fn encode(fields: &SummaryFields) -> String {
    format!(
        "{TITLE_PREFIX}{}\n{SUMMARY_PREFIX}{}\n{AUTHOR_PREFIX}{}",
        fields.title, fields.summary, fields.author
    )
}

/// Recover the three fields from a stored blob, tolerating blobs the codec
/// did not produce.
pub fn decode(blob: &str) -> SummaryFields {
    let mut fields = SummaryFields::default();
    for line in blob.lines() {
        if let Some(rest) = line.strip_prefix(TITLE_PREFIX) {
            fields.title = rest.to_string();
        } else if let Some(rest) = line.strip_prefix(SUMMARY_PREFIX) {
            fields.summary = rest.to_string();
        } else if let Some(rest) = line.strip_prefix(AUTHOR_PREFIX) {
            fields.author = rest.to_string();
        }
    }
    fields
}
