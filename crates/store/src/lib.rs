//! Record-store gateway for the summary-notes core.
//!
//! Two pieces:
//! - [`StoreConfig`]: explicit configuration built from the environment
//!   once at process start and passed into the gateway constructor. The
//!   core never reads global state.
//! - [`EngagementsClient`]: the production [`crmnote_core::RecordStore`]
//!   backed by the CRM's engagements v1 HTTP API.

pub mod config;
pub mod engagements;

pub use config::{StoreConfig, DEFAULT_BASE_URL};
pub use engagements::EngagementsClient;
