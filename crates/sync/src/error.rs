//! Sync error types.

use thiserror::Error;

/// Errors that can occur while pushing to the spreadsheet.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No webhook URL saved or configured.
    #[error("spreadsheet URL is not configured; save one with `attendo sheet-url <URL>`")]
    NotConfigured,

    /// No member has a record on the date.
    #[error("no attendance records to send for this date")]
    NothingToSend,

    /// Payload could not be encoded.
    #[error("payload encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// Request could not be sent or the response could not be read.
    #[error("spreadsheet request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("spreadsheet endpoint returned status {0}")]
    Status(u16),

    /// The script reported a failure.
    #[error("spreadsheet script error: {0}")]
    Script(String),
}

impl SyncError {
    /// Returns the error code for operator-facing output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotConfigured => "SHEET_NOT_CONFIGURED",
            Self::NothingToSend => "SHEET_NOTHING_TO_SEND",
            Self::Encode(_) => "SHEET_ENCODE",
            Self::Transport(_) => "SHEET_TRANSPORT",
            Self::Status(_) => "SHEET_STATUS",
            Self::Script(_) => "SHEET_SCRIPT",
        }
    }
}

impl From<SyncError> for attendo_shared::AppError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::NotConfigured => Self::Configuration(err.to_string()),
            SyncError::NothingToSend => Self::Validation(err.to_string()),
            SyncError::Encode(_) => Self::Internal(err.to_string()),
            SyncError::Transport(_) | SyncError::Status(_) | SyncError::Script(_) => {
                Self::ExternalService(err.to_string())
            }
        }
    }
}
