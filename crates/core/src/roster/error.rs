//! Roster error types.

use thiserror::Error;

/// Errors that can occur while importing a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The file has no data rows after the header.
    #[error("roster file has no data rows (first line must be the header)")]
    MissingRows,

    /// No row produced a valid member.
    #[error("roster file contains no valid member rows")]
    Empty,
}

impl RosterError {
    /// Returns the error code for operator-facing output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRows => "ROSTER_MISSING_ROWS",
            Self::Empty => "ROSTER_EMPTY",
        }
    }
}

impl From<RosterError> for attendo_shared::AppError {
    fn from(err: RosterError) -> Self {
        Self::Validation(err.to_string())
    }
}
