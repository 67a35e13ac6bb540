//! CRM Summary Notes MCP Server
//!
//! Exposes summary notes stored as CRM engagement records to AI agents via
//! the MCP protocol.
//!
//! ## Tools
//!
//! - `create_summary` - create a note (title, summary, author)
//! - `list_summaries` - list notes, optionally narrowed by date, weekday,
//!   time-of-day window, free text, and limit
//! - `update_summary` - update a note located by id or free-text query;
//!   empty fields are left unchanged
//! - `delete_summary` - delete a note located by id or by the same filters
//!   as listing (most recent match wins)
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "crm-notes": {
//!       "command": "crmnote-mcp",
//!       "env": {
//!         "HUBSPOT_ACCESS_TOKEN": "...",
//!         "HUBSPOT_CONTACT_ID": "..."
//!       }
//!     }
//!   }
//! }
//! ```

use std::sync::Arc;

use anyhow::Result;
use rmcp::transport::stdio;
use rmcp::ServiceExt;

mod tools;

use crmnote_core::SummaryService;
use crmnote_store::{EngagementsClient, StoreConfig};
use tools::SummaryNotesService;

#[tokio::main]
async fn main() -> Result<()> {
    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("Starting CRM summary-notes MCP server");

    // Credentials and the association target are resolved once, before any
    // network call; a missing variable aborts startup.
    let config = StoreConfig::from_env()?;
    let gateway = Arc::new(EngagementsClient::new(&config));
    let service = SummaryService::new(gateway, config.contact_id.clone());

    let server = SummaryNotesService::new(service).serve(stdio()).await?;

    // Wait for shutdown
    server.waiting().await?;

    log::info!("CRM summary-notes MCP server stopped");
    Ok(())
}
