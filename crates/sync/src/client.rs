//! Webhook client.

use std::time::Duration;

use attendo_core::report::SheetPayload;
use attendo_shared::SheetConfig;
use reqwest::header::CONTENT_TYPE;
use tracing::{info, warn};

use crate::error::SyncError;

const CONTENT_TYPE_TEXT: &str = "text/plain;charset=utf-8";
const SCRIPT_ERROR_FALLBACK: &str = "script reported an error";
const SCRIPT_CRASH: &str = "script execution failed; check the deployment's access permissions";

/// Successful push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReceipt {
    /// Rows sent.
    pub rows: usize,
    /// Raw response body.
    pub response: String,
}

/// Picks the saved URL over the configured one.
pub fn resolve_url(saved: Option<String>, config: &SheetConfig) -> Result<String, SyncError> {
    saved
        .filter(|url| !url.trim().is_empty())
        .or_else(|| config.url.clone())
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .ok_or(SyncError::NotConfigured)
}

/// Classifies a webhook response.
///
/// A JSON body with `"result": "error"` is a script failure; its `message`
/// (or `error`) field becomes the error text. A non-JSON body mentioning
/// `Error` or `Exception` is a crashed script. Anything else is success.
pub fn interpret_response(status: u16, body: &str) -> Result<(), SyncError> {
    if !(200..300).contains(&status) {
        return Err(SyncError::Status(status));
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) if json.get("result").and_then(|r| r.as_str()) == Some("error") => {
            let message = ["message", "error"]
                .iter()
                .find_map(|field| json.get(*field).and_then(|v| v.as_str()))
                .filter(|m| !m.is_empty())
                .unwrap_or(SCRIPT_ERROR_FALLBACK);
            Err(SyncError::Script(message.to_string()))
        }
        Ok(_) => Ok(()),
        Err(_) if body.contains("Error") || body.contains("Exception") => {
            Err(SyncError::Script(SCRIPT_CRASH.to_string()))
        }
        Err(_) => Ok(()),
    }
}

/// Client for one webhook URL.
#[derive(Debug, Clone)]
pub struct SheetClient {
    http: reqwest::Client,
    url: String,
}

impl SheetClient {
    /// Creates a client with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Creates a client from the `[sheet]` section and an optional saved URL.
    pub fn from_config(saved: Option<String>, config: &SheetConfig) -> Result<Self, SyncError> {
        let url = resolve_url(saved, config)?;
        Self::new(url, Duration::from_secs(config.timeout_secs))
    }

    /// The webhook URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends the payload.
    ///
    /// # Errors
    /// * `NothingToSend` for an empty payload; no request is made
    /// * `Transport`, `Status` or `Script` when the push fails
    pub async fn push(&self, payload: &SheetPayload) -> Result<SyncReceipt, SyncError> {
        if payload.is_empty() {
            return Err(SyncError::NothingToSend);
        }

        let body = serde_json::to_string(payload)?;

        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, CONTENT_TYPE_TEXT)
            .body(body)
            .send()
            .await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        if let Err(err) = interpret_response(status, &text) {
            warn!(status, error = %err, "Spreadsheet push failed");
            return Err(err);
        }

        info!(rows = payload.records.len(), status, "Attendance pushed to spreadsheet");
        Ok(SyncReceipt {
            rows: payload.records.len(),
            response: text,
        })
    }
}
