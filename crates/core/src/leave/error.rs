//! Ledger error types.

use attendo_shared::types::{MemberId, RequestId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::leave::types::VacationStatus;
use crate::store::StoreError;

/// Errors that can occur during ledger operations.
///
/// Every variant except `Store` is raised before any write, so a failed
/// operation leaves requests, attendance, and balances untouched.
#[derive(Debug, Error)]
pub enum LeaveError {
    /// Leave starts after it ends.
    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange {
        /// Requested first day.
        start: NaiveDate,
        /// Requested last day.
        end: NaiveDate,
    },

    /// A required field is blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Allotment below zero.
    #[error("Total leave days cannot be negative: {0}")]
    NegativeAllotment(Decimal),

    /// Attempted an illegal status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: VacationStatus,
        /// The attempted target status.
        to: VacationStatus,
    },

    /// Vacation request not found.
    #[error("Vacation request {0} not found")]
    RequestNotFound(RequestId),

    /// Member not on the roster.
    #[error("Member {0} not found")]
    MemberNotFound(MemberId),

    /// Storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LeaveError {
    /// Returns true for input validation failures.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDateRange { .. } | Self::MissingField(_) | Self::NegativeAllotment(_)
        )
    }

    /// Returns the error code for operator-facing output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::NegativeAllotment(_) => "NEGATIVE_ALLOTMENT",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::RequestNotFound(_) => "REQUEST_NOT_FOUND",
            Self::MemberNotFound(_) => "MEMBER_NOT_FOUND",
            Self::Store(err) => err.error_code(),
        }
    }
}

impl From<LeaveError> for attendo_shared::AppError {
    fn from(err: LeaveError) -> Self {
        match err {
            LeaveError::Store(inner) => inner.into(),
            LeaveError::RequestNotFound(_) | LeaveError::MemberNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            LeaveError::InvalidTransition { .. } => Self::BusinessRule(err.to_string()),
            LeaveError::InvalidDateRange { .. }
            | LeaveError::MissingField(_)
            | LeaveError::NegativeAllotment(_) => Self::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attendo_shared::AppError;

    #[test]
    fn test_invalid_transition_error() {
        let err = LeaveError::InvalidTransition {
            from: VacationStatus::PendingSecretary,
            to: VacationStatus::FinalApproved,
        };
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("PENDING_SECRETARY"));
        assert!(err.to_string().contains("FINAL_APPROVED"));
        assert!(!err.is_validation());
        assert!(matches!(AppError::from(err), AppError::BusinessRule(_)));
    }

    #[test]
    fn test_date_range_error_is_validation() {
        let err = LeaveError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        };
        assert!(err.is_validation());
        assert_eq!(err.error_code(), "INVALID_DATE_RANGE");
        assert!(matches!(AppError::from(err), AppError::Validation(_)));
    }

    #[test]
    fn test_not_found_errors() {
        let err = LeaveError::MemberNotFound(MemberId::from("mem-404"));
        assert_eq!(err.to_string(), "Member mem-404 not found");
        assert!(matches!(AppError::from(err), AppError::NotFound(_)));

        let err = LeaveError::RequestNotFound(RequestId::new());
        assert_eq!(err.error_code(), "REQUEST_NOT_FOUND");
    }

    #[test]
    fn test_store_error_passes_through() {
        let err = LeaveError::from(StoreError::backend("disk full"));
        assert_eq!(err.error_code(), "STORE_BACKEND");
        assert!(matches!(AppError::from(err), AppError::Storage(_)));
    }
}
