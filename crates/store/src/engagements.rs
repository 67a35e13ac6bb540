//! Engagements-API gateway.
//!
//! Implements [`RecordStore`] against the CRM's engagements v1 endpoints.
//! Each call is a single round trip with the client's default timeouts; the
//! core adds no retry policy on top. Wire envelopes are parsed leniently:
//! a record without a metadata body maps to an empty blob.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crmnote_core::{NoteError, RawRecord, RecordStore, Result};

use crate::config::StoreConfig;

pub struct EngagementsClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl EngagementsClient {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.clone(),
            access_token: config.access_token.clone(),
        }
    }

    fn engagements_url(&self) -> String {
        format!("{}/engagements/v1/engagements", self.base_url)
    }

    fn engagement_url(&self, id: &str) -> String {
        format!("{}/engagements/v1/engagements/{id}", self.base_url)
    }
}

fn transport(err: reqwest::Error) -> NoteError {
    NoteError::Unknown(format!("engagements API request failed: {err}"))
}

/// Map a non-success response into the failure taxonomy. 404 becomes
/// `NotFound`; every other non-success status carries its code and the
/// response text.
async fn ensure_success(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(NoteError::NotFound(format!("{context}: no such engagement")));
    }
    let message = response.text().await.unwrap_or_default();
    Err(NoteError::Http {
        status: status.as_u16(),
        message: if message.is_empty() {
            context.to_string()
        } else {
            message
        },
    })
}

#[derive(Debug, Deserialize)]
struct PagedEngagements {
    #[serde(default)]
    results: Vec<EngagementEnvelope>,
}

#[derive(Debug, Deserialize)]
struct EngagementEnvelope {
    engagement: EngagementHeader,
    #[serde(default)]
    metadata: EngagementMetadata,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EngagementHeader {
    id: u64,
    #[serde(default)]
    created_at: i64,
}

#[derive(Debug, Default, Deserialize)]
struct EngagementMetadata {
    #[serde(default)]
    body: Option<String>,
}

impl From<EngagementEnvelope> for RawRecord {
    fn from(envelope: EngagementEnvelope) -> Self {
        RawRecord {
            id: envelope.engagement.id.to_string(),
            created_at_millis: envelope.engagement.created_at,
            body_blob: envelope.metadata.body.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl RecordStore for EngagementsClient {
    async fn list_page(&self, max_count: usize) -> Result<Vec<RawRecord>> {
        log::debug!("listing up to {max_count} engagements");
        let response = self
            .http
            .get(format!("{}/paged", self.engagements_url()))
            .bearer_auth(&self.access_token)
            .query(&[("limit", max_count)])
            .send()
            .await
            .map_err(transport)?;
        let response = ensure_success(response, "list engagements").await?;
        let page: PagedEngagements = response.json().await.map_err(transport)?;
        Ok(page.results.into_iter().map(RawRecord::from).collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<RawRecord> {
        log::debug!("fetching engagement {id}");
        let response = self
            .http
            .get(self.engagement_url(id))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(transport)?;
        let response = ensure_success(response, "get engagement").await?;
        let envelope: EngagementEnvelope = response.json().await.map_err(transport)?;
        Ok(envelope.into())
    }

    async fn create(&self, body_blob: &str, associated_entity_id: &str) -> Result<String> {
        let contact_id: u64 = associated_entity_id.parse().map_err(|_| {
            NoteError::Configuration("associated contact id must be numeric".to_string())
        })?;
        let payload = json!({
            "engagement": { "active": true, "type": "NOTE" },
            "associations": { "contactIds": [contact_id] },
            "metadata": { "body": body_blob },
        });
        log::debug!("creating engagement for contact {contact_id}");
        let response = self
            .http
            .post(self.engagements_url())
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await
            .map_err(transport)?;
        let response = ensure_success(response, "create engagement").await?;
        let envelope: EngagementEnvelope = response.json().await.map_err(transport)?;
        Ok(envelope.engagement.id.to_string())
    }

    async fn update_body(&self, id: &str, body_blob: &str) -> Result<()> {
        log::debug!("updating engagement {id}");
        let response = self
            .http
            .patch(self.engagement_url(id))
            .bearer_auth(&self.access_token)
            .json(&json!({ "metadata": { "body": body_blob } }))
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response, "update engagement").await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        log::debug!("deleting engagement {id}");
        let response = self
            .http
            .delete(self.engagement_url(id))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response, "delete engagement").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn paged_payload_maps_to_raw_records() {
        let payload = r#"{
            "results": [
                {
                    "engagement": { "id": 9001, "createdAt": 1709290800000, "type": "NOTE" },
                    "metadata": { "body": "Title: T\nSummary: S\nAuthor: A" }
                },
                {
                    "engagement": { "id": 9002, "createdAt": 1709294400000 }
                }
            ],
            "hasMore": true,
            "offset": 2
        }"#;
        let page: PagedEngagements = serde_json::from_str(payload).unwrap();
        let records: Vec<RawRecord> = page.results.into_iter().map(RawRecord::from).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "9001");
        assert_eq!(records[0].created_at_millis, 1709290800000);
        assert_eq!(records[0].body_blob, "Title: T\nSummary: S\nAuthor: A");
        // Missing metadata body decodes to an empty blob, not a failure.
        assert_eq!(records[1].id, "9002");
        assert_eq!(records[1].body_blob, "");
    }

    #[test]
    fn empty_page_parses() {
        let page: PagedEngagements = serde_json::from_str("{}").unwrap();
        assert!(page.results.is_empty());
    }

    #[test]
    fn single_envelope_parses_without_created_at() {
        let payload = r#"{ "engagement": { "id": 7 } }"#;
        let envelope: EngagementEnvelope = serde_json::from_str(payload).unwrap();
        let record = RawRecord::from(envelope);
        assert_eq!(record.id, "7");
        assert_eq!(record.created_at_millis, 0);
    }
}
