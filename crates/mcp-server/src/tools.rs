//! MCP Tools for CRM Summary Notes
//!
//! Four tools over one record type. Operational failures come back as
//! descriptive error text; only malformed tool arguments surface as
//! protocol-level invalid-params (handled by the `Parameters` layer).

use chrono::{TimeZone, Utc};
use crmnote_core::{
    codec, FilterCriteria, RawRecord, SummaryPatch, SummaryService, TimeRange,
};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

/// CRM Summary Notes MCP Service
#[derive(Clone)]
pub struct SummaryNotesService {
    /// The four operations over the record-store gateway
    service: SummaryService,
    /// Tool router
    tool_router: ToolRouter<Self>,
}

impl SummaryNotesService {
    pub fn new(service: SummaryService) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for SummaryNotesService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Manages summary notes stored in the CRM. Use 'create_summary' to record a note, 'list_summaries' to browse or search notes, 'update_summary' to revise one located by id or query, and 'delete_summary' to remove one. Filters only see the most recent 100 notes.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Tool Input/Output Schemas
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateSummaryRequest {
    /// Note title
    #[schemars(description = "Note title")]
    pub title: String,

    /// Note body text
    #[schemars(description = "Note body text")]
    pub summary: String,

    /// Person the note is attributed to
    #[schemars(description = "Person the note is attributed to")]
    pub author: String,
}

/// Inclusive local time-of-day window. Both bounds must be zero-padded
/// 24-hour `HH:MM`; the comparison is on the strings themselves.
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct TimeRangeArg {
    #[schemars(description = "Window start, zero-padded 24h HH:MM")]
    pub start: String,

    #[schemars(description = "Window end, zero-padded 24h HH:MM (inclusive)")]
    pub end: String,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListSummariesRequest {
    /// Exact UTC calendar date
    #[schemars(description = "Only notes created on this UTC date, YYYY-MM-DD")]
    pub date: Option<String>,

    /// Weekday name, Sunday..Saturday
    #[schemars(description = "Only notes created on this weekday (full name, case-insensitive)")]
    pub day_of_week: Option<String>,

    /// Local time-of-day window
    #[schemars(description = "Only notes created within this local time-of-day window")]
    pub time_range: Option<TimeRangeArg>,

    /// Free-text search
    #[schemars(description = "Only notes whose body contains this text (case-insensitive)")]
    pub query: Option<String>,

    /// Result cap, newest first
    #[schemars(description = "Maximum number of notes to return (newest first)")]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateSummaryRequest {
    /// Target record id; when absent, `query` locates the note
    #[schemars(description = "Id of the note to update")]
    pub id: Option<String>,

    #[schemars(description = "Free text locating the note to update when no id is given; the most recent match is used")]
    pub query: Option<String>,

    /// Empty or absent fields are left unchanged
    #[schemars(description = "New title; empty leaves the stored title unchanged")]
    pub title: Option<String>,

    #[schemars(description = "New body text; empty leaves the stored text unchanged")]
    pub summary: Option<String>,

    #[schemars(description = "New author; empty leaves the stored author unchanged")]
    pub author: Option<String>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct DeleteSummaryRequest {
    /// Target record id; when absent, the filters locate the note
    #[schemars(description = "Id of the note to delete")]
    pub id: Option<String>,

    #[schemars(description = "Only notes created on this UTC date, YYYY-MM-DD")]
    pub date: Option<String>,

    #[schemars(description = "Only notes created on this weekday (full name, case-insensitive)")]
    pub day_of_week: Option<String>,

    #[schemars(description = "Only notes created within this local time-of-day window")]
    pub time_range: Option<TimeRangeArg>,

    #[schemars(description = "Only notes whose body contains this text (case-insensitive)")]
    pub query: Option<String>,

    /// Defaults to 1; even when several notes resolve, only the most
    /// recent is deleted
    #[schemars(description = "How many candidates to resolve (the most recent one is deleted)")]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct NoteIdResult {
    /// Record id the operation acted on
    pub id: String,
}

/// One note in a listing, body already decoded.
#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct NoteView {
    pub id: String,
    /// RFC 3339 UTC creation instant
    pub created_at: String,
    pub title: String,
    pub summary: String,
    pub author: String,
}

impl From<RawRecord> for NoteView {
    fn from(record: RawRecord) -> Self {
        let created_at = Utc
            .timestamp_millis_opt(record.created_at_millis)
            .single()
            .map(|instant| instant.to_rfc3339())
            .unwrap_or_default();
        let fields = codec::decode(&record.body_blob);
        NoteView {
            id: record.id,
            created_at,
            title: fields.title,
            summary: fields.summary,
            author: fields.author,
        }
    }
}

fn build_criteria(
    date: Option<String>,
    day_of_week: Option<String>,
    time_range: Option<TimeRangeArg>,
    query: Option<String>,
    limit: Option<i64>,
) -> FilterCriteria {
    FilterCriteria {
        date,
        day_of_week,
        time_range: time_range.map(|range| TimeRange {
            start: range.start,
            end: range.end,
        }),
        query,
        limit,
    }
}

fn json_result<T: Serialize>(value: &T) -> CallToolResult {
    CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).unwrap_or_default(),
    )])
}

// ============================================================================
// Tools
// ============================================================================

#[tool_router]
impl SummaryNotesService {
    /// Create a summary note
    #[tool(description = "Create a summary note in the CRM. Title, summary and author are all required.")]
    pub async fn create_summary(
        &self,
        Parameters(request): Parameters<CreateSummaryRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self
            .service
            .create_summary(&request.title, &request.summary, &request.author)
            .await
        {
            Ok(id) => Ok(json_result(&NoteIdResult { id })),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!("Error: {e}"))])),
        }
    }

    /// List or search summary notes
    #[tool(description = "List summary notes, newest first, optionally narrowed by UTC date, weekday, local time-of-day window, free text, and a result limit. Only the most recent 100 notes are searched.")]
    pub async fn list_summaries(
        &self,
        Parameters(request): Parameters<ListSummariesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let criteria = build_criteria(
            request.date,
            request.day_of_week,
            request.time_range,
            request.query,
            request.limit,
        );
        match self.service.list_summaries(&criteria).await {
            Ok(records) => {
                let notes: Vec<NoteView> = records.into_iter().map(NoteView::from).collect();
                Ok(json_result(&notes))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!("Error: {e}"))])),
        }
    }

    /// Update a summary note
    #[tool(description = "Update a summary note located by id, or by a free-text query (most recent match). Supplied non-empty fields replace the stored ones; empty or absent fields are left unchanged.")]
    pub async fn update_summary(
        &self,
        Parameters(request): Parameters<UpdateSummaryRequest>,
    ) -> Result<CallToolResult, McpError> {
        let patch = SummaryPatch {
            title: request.title,
            summary: request.summary,
            author: request.author,
        };
        match self
            .service
            .update_summary(request.id.as_deref(), request.query.as_deref(), &patch)
            .await
        {
            Ok(id) => Ok(json_result(&NoteIdResult { id })),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!("Error: {e}"))])),
        }
    }

    /// Delete a summary note
    #[tool(description = "Delete a summary note located by id, or by the same filters as listing. Without id or filters the single most recent note is deleted. Returns the id actually deleted.")]
    pub async fn delete_summary(
        &self,
        Parameters(request): Parameters<DeleteSummaryRequest>,
    ) -> Result<CallToolResult, McpError> {
        let criteria = build_criteria(
            request.date,
            request.day_of_week,
            request.time_range,
            request.query,
            request.limit,
        );
        match self
            .service
            .delete_summary(request.id.as_deref(), &criteria)
            .await
        {
            Ok(id) => Ok(json_result(&NoteIdResult { id })),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!("Error: {e}"))])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn build_criteria_maps_all_fields() {
        let criteria = build_criteria(
            Some("2024-03-01".to_string()),
            Some("Friday".to_string()),
            Some(TimeRangeArg {
                start: "09:00".to_string(),
                end: "10:00".to_string(),
            }),
            Some("budget".to_string()),
            Some(5),
        );
        assert_eq!(criteria.date.as_deref(), Some("2024-03-01"));
        assert_eq!(criteria.day_of_week.as_deref(), Some("Friday"));
        let range = criteria.time_range.unwrap();
        assert_eq!(range.start, "09:00");
        assert_eq!(range.end, "10:00");
        assert_eq!(criteria.query.as_deref(), Some("budget"));
        assert_eq!(criteria.limit, Some(5));
    }

    #[test]
    fn list_request_deserializes_with_all_fields_absent() {
        let request: ListSummariesRequest = serde_json::from_str("{}").unwrap();
        assert!(request.date.is_none());
        assert!(request.time_range.is_none());
        assert!(request.limit.is_none());
    }

    #[test]
    fn note_view_decodes_body_and_formats_instant() {
        let record = RawRecord {
            id: "42".to_string(),
            created_at_millis: Utc
                .with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
                .unwrap()
                .timestamp_millis(),
            body_blob: "Title: T\nSummary: S\nAuthor: A".to_string(),
        };
        let view = NoteView::from(record);
        assert_eq!(view.id, "42");
        assert!(view.created_at.starts_with("2024-03-01T12:30:00"));
        assert_eq!(view.title, "T");
        assert_eq!(view.summary, "S");
        assert_eq!(view.author, "A");
    }

    #[test]
    fn note_view_tolerates_free_text_bodies() {
        let record = RawRecord {
            id: "7".to_string(),
            created_at_millis: 0,
            body_blob: "not produced by the codec".to_string(),
        };
        let view = NoteView::from(record);
        assert_eq!(view.title, "");
        assert_eq!(view.summary, "");
        assert_eq!(view.author, "");
    }
}
