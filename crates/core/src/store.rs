//! Record-store gateway seam.
//!
//! The core treats the CRM as a black box behind this trait: one page of
//! records in, single-record mutations out. Implementations live outside
//! this crate (see `crmnote-store`); tests supply in-memory fakes.

use async_trait::async_trait;

use crate::error::Result;
use crate::record::RawRecord;

/// Size of the single page every filter/search operation sees. Only the
/// most recent `PAGE_SIZE` records are ever candidates — a documented
/// scale limitation, not something to paper over with pagination.
pub const PAGE_SIZE: usize = 100;

/// Narrow interface to the external record store. Every call is one
/// blocking round trip; retry and timeout policy belongs to the
/// implementation, never to the core.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch at most one page of records, unordered.
    async fn list_page(&self, max_count: usize) -> Result<Vec<RawRecord>>;

    /// Fetch a single record by identifier.
    async fn get_by_id(&self, id: &str) -> Result<RawRecord>;

    /// Create a record carrying the body blob, associated with the
    /// configured CRM entity. Returns the store-assigned identifier.
    async fn create(&self, body_blob: &str, associated_entity_id: &str) -> Result<String>;

    /// Replace the body blob of an existing record.
    async fn update_body(&self, id: &str, body_blob: &str) -> Result<()>;

    /// Delete a record by identifier.
    async fn delete(&self, id: &str) -> Result<()>;
}
