//! Summary-note domain core.
//!
//! Everything with decision logic lives here, behind the narrow
//! [`RecordStore`] gateway seam:
//! - body codec: the three-line `Title:/Summary:/Author:` blob format
//! - filter engine: date / weekday / time-window / substring narrowing
//! - candidate resolver: ambiguous input -> concrete record identifiers
//! - merge policy: non-empty caller fields win on update
//!
//! It is consumed by `crmnote-mcp` (MCP tools) and backed by
//! `crmnote-store` (the engagements-API gateway).

pub mod codec;
pub mod error;
pub mod filter;
pub mod merge;
pub mod ops;
pub mod record;
pub mod resolver;
pub mod store;

pub use error::{NoteError, Result};
pub use filter::{FilterCriteria, TimeRange};
pub use merge::SummaryPatch;
pub use ops::SummaryService;
pub use record::{RawRecord, SummaryFields};
pub use store::{RecordStore, PAGE_SIZE};
