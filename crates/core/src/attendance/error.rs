//! Attendance error types.

use attendo_shared::types::MemberId;
use chrono::NaiveDate;
use thiserror::Error;

use crate::store::StoreError;

/// Errors raised by manual attendance entry.
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// Member not on the roster.
    #[error("Member {0} not found")]
    MemberNotFound(MemberId),

    /// Edit of a slot that has no record yet.
    #[error("No attendance record for {member_id} on {date}")]
    RecordNotFound {
        /// The member.
        member_id: MemberId,
        /// The date.
        date: NaiveDate,
    },

    /// The slot holds approved leave; manual statuses cannot replace it.
    #[error("{member_id} is on leave on {date}; the record cannot be changed manually")]
    ExcusedLocked {
        /// The member.
        member_id: MemberId,
        /// The date.
        date: NaiveDate,
    },

    /// Storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AttendanceError {
    /// Returns the error code for operator-facing output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MemberNotFound(_) => "MEMBER_NOT_FOUND",
            Self::RecordNotFound { .. } => "RECORD_NOT_FOUND",
            Self::ExcusedLocked { .. } => "EXCUSED_LOCKED",
            Self::Store(err) => err.error_code(),
        }
    }
}

impl From<AttendanceError> for attendo_shared::AppError {
    fn from(err: AttendanceError) -> Self {
        match err {
            AttendanceError::Store(inner) => inner.into(),
            AttendanceError::MemberNotFound(_) | AttendanceError::RecordNotFound { .. } => {
                Self::NotFound(err.to_string())
            }
            AttendanceError::ExcusedLocked { .. } => Self::BusinessRule(err.to_string()),
        }
    }
}
