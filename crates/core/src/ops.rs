//! The four summary-note operations.
//!
//! Each operation is request-scoped and runs to completion: fresh fetch
//! when resolution is needed, read-then-write without a transaction, no
//! retries. A race between two concurrent updates against the same record
//! is last-write-wins at the store and is not guarded here.

use std::sync::Arc;

use crate::codec;
use crate::error::{NoteError, Result};
use crate::filter::{self, FilterCriteria};
use crate::merge::{self, SummaryPatch};
use crate::record::{RawRecord, SummaryFields};
use crate::resolver;
use crate::store::{RecordStore, PAGE_SIZE};

/// Orchestrates codec, filter engine, resolver and merge policy over the
/// gateway. Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct SummaryService {
    store: Arc<dyn RecordStore>,
    associated_entity_id: String,
}

impl SummaryService {
    pub fn new(store: Arc<dyn RecordStore>, associated_entity_id: impl Into<String>) -> Self {
        Self {
            store,
            associated_entity_id: associated_entity_id.into(),
        }
    }

    /// Create a note from three required fields. Returns the new record id.
    pub async fn create_summary(&self, title: &str, summary: &str, author: &str) -> Result<String> {
        for (name, value) in [("title", title), ("summary", summary), ("author", author)] {
            if value.trim().is_empty() {
                return Err(NoteError::Validation(format!("{name} must not be empty")));
            }
        }
        let body = codec::encode(&SummaryFields {
            title: title.to_string(),
            summary: summary.to_string(),
            author: author.to_string(),
        });
        let id = self.store.create(&body, &self.associated_entity_id).await?;
        log::debug!("created summary note {id}");
        Ok(id)
    }

    /// List notes matching the criteria, newest first. Only the most
    /// recent [`PAGE_SIZE`] records are visible to the filters.
    pub async fn list_summaries(&self, criteria: &FilterCriteria) -> Result<Vec<RawRecord>> {
        let page = self.store.list_page(PAGE_SIZE).await?;
        filter::apply(page, criteria)
    }

    /// Update a note resolved by explicit id or by free-text query,
    /// merging non-empty patch fields over the stored ones. Returns the id
    /// acted on.
    pub async fn update_summary(
        &self,
        id: Option<&str>,
        query: Option<&str>,
        patch: &SummaryPatch,
    ) -> Result<String> {
        let id = match id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id.to_string(),
            None => {
                let query = query.filter(|q| !q.trim().is_empty()).ok_or_else(|| {
                    NoteError::Validation(
                        "an id or a search query is required to locate the note to update"
                            .to_string(),
                    )
                })?;
                let page = self.store.list_page(PAGE_SIZE).await?;
                resolver::resolve_update_candidate(page, query)?
            }
        };

        let record = self.store.get_by_id(&id).await?;
        let previous = codec::decode(&record.body_blob);
        let merged = merge::merge(previous, patch);
        self.store.update_body(&id, &codec::encode(&merged)).await?;
        log::debug!("updated summary note {id}");
        Ok(id)
    }

    /// Delete a note resolved by explicit id or by the full filter
    /// criteria. When the criteria resolve more than one candidate, only
    /// the first (most recent) is deleted. Returns the id deleted.
    pub async fn delete_summary(
        &self,
        id: Option<&str>,
        criteria: &FilterCriteria,
    ) -> Result<String> {
        let id = match id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id.to_string(),
            None => {
                let page = self.store.list_page(PAGE_SIZE).await?;
                let candidates = resolver::resolve_delete_candidates(page, criteria)?;
                candidates.into_iter().next().ok_or_else(|| {
                    NoteError::NotFound("no summary notes match the given filters".to_string())
                })?
            }
        };

        self.store.delete(&id).await?;
        log::debug!("deleted summary note {id}");
        Ok(id)
    }
}
