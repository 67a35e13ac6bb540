//! Startup configuration.
//!
//! Credentials and the association target are read from the environment
//! exactly once, before any network call; anything missing or malformed is
//! a configuration error that aborts startup.

use std::env;

use crmnote_core::{NoteError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

/// Everything the gateway needs, resolved at process start.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Private-app bearer token for the engagements API.
    pub access_token: String,
    /// Numeric id of the CRM contact every note is associated with.
    pub contact_id: String,
    /// API origin, overridable for tests and mock servers. No trailing
    /// slash.
    pub base_url: String,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        let access_token = require_env("HUBSPOT_ACCESS_TOKEN")?;
        let contact_id = require_env("HUBSPOT_CONTACT_ID")?;
        if contact_id.parse::<u64>().is_err() {
            return Err(NoteError::Configuration(
                "HUBSPOT_CONTACT_ID must be a numeric contact id".to_string(),
            ));
        }
        let base_url = env::var("HUBSPOT_BASE_URL")
            .ok()
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            access_token,
            contact_id,
            base_url,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| NoteError::Configuration(format!("{key} is not set")))
}
