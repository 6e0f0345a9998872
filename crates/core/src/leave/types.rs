//! Leave domain types: requests, approval status, balances.

use attendo_shared::types::{MemberId, RequestId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vacation request status in the two-stage approval chain.
///
/// The valid transitions are:
/// - PendingSecretary → SecretaryApproved (secretary approves)
/// - SecretaryApproved → FinalApproved (director approves)
/// - PendingSecretary → Rejected
/// - SecretaryApproved → Rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VacationStatus {
    /// Submitted, waiting for the secretary.
    PendingSecretary,
    /// Secretary approved, waiting for the director.
    SecretaryApproved,
    /// Director approved; attendance and balance have been applied.
    FinalApproved,
    /// Rejected at either stage.
    Rejected,
}

impl VacationStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingSecretary => "PENDING_SECRETARY",
            Self::SecretaryApproved => "SECRETARY_APPROVED",
            Self::FinalApproved => "FINAL_APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "PENDING_SECRETARY" => Some(Self::PendingSecretary),
            "SECRETARY_APPROVED" => Some(Self::SecretaryApproved),
            "FINAL_APPROVED" => Some(Self::FinalApproved),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Korean label shown on the approval queue.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::PendingSecretary => "대기 (사무국장)",
            Self::SecretaryApproved => "사무국장 승인 (원장 대기)",
            Self::FinalApproved => "최종 승인 (완료)",
            Self::Rejected => "반려됨",
        }
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::FinalApproved | Self::Rejected)
    }

    /// Returns true if the request still waits on an approver.
    #[must_use]
    pub fn is_awaiting_approval(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for VacationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A vacation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationRequest {
    /// Request identifier.
    pub id: RequestId,
    /// The requesting member.
    pub member_id: MemberId,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Free-form leave type label, e.g. `연차`, `반차(오전)`, `공가`.
    #[serde(rename = "type")]
    pub leave_type: String,
    /// Reason given by the member.
    pub reason: String,
    /// Approval status.
    pub status: VacationStatus,
    /// Submission time.
    pub request_date: DateTime<Utc>,
}

impl VacationRequest {
    /// Note written on every attendance record derived from this request.
    #[must_use]
    pub fn attendance_note(&self) -> String {
        format!("휴가({}): {}", self.leave_type, self.reason)
    }
}

/// Leave allotment and usage for one member.
///
/// `remaining` is derived and may go negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationBalance {
    /// The member.
    pub member_id: MemberId,
    /// Days granted.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_days: Decimal,
    /// Days consumed by approved leave.
    #[serde(with = "rust_decimal::serde::float")]
    pub used_days: Decimal,
}

impl VacationBalance {
    /// Creates an unused balance with the given allotment.
    #[must_use]
    pub fn new(member_id: MemberId, total_days: Decimal) -> Self {
        Self {
            member_id,
            total_days,
            used_days: Decimal::ZERO,
        }
    }

    /// Days left; negative when over-drawn.
    #[must_use]
    pub fn remaining(&self) -> Decimal {
        self.total_days - self.used_days
    }
}
