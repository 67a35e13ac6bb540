use serde::{Deserialize, Serialize};

/// One engagement record as the store hands it back.
///
/// `id` is opaque (assigned by the store at creation) and `created_at_millis`
/// is a millisecond epoch instant; both are immutable after creation. The
/// body blob is the encoded note content, see [`crate::codec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,
    pub created_at_millis: i64,
    pub body_blob: String,
}

/// The three logical note fields. An empty string means "unset" for merge
/// purposes, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryFields {
    pub title: String,
    pub summary: String,
    pub author: String,
}
