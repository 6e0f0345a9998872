//! Attendance domain types.

use attendo_shared::types::MemberId;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label shown for a member with no record on a date.
pub const PENDING_LABEL: &str = "미체크";

/// Recorded attendance status.
///
/// There is no `Pending` variant: pending is the absence of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    /// Present.
    Present,
    /// Arrived late.
    Late,
    /// Absent.
    Absent,
    /// On approved leave or official absence.
    Excused,
}

impl AttendanceStatus {
    /// All recorded statuses, in display order.
    pub const ALL: [Self; 4] = [Self::Present, Self::Late, Self::Absent, Self::Excused];

    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "PRESENT",
            Self::Late => "LATE",
            Self::Absent => "ABSENT",
            Self::Excused => "EXCUSED",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PRESENT" => Some(Self::Present),
            "LATE" => Some(Self::Late),
            "ABSENT" => Some(Self::Absent),
            "EXCUSED" => Some(Self::Excused),
            _ => None,
        }
    }

    /// Korean label used in exports and the spreadsheet.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Present => "출석",
            Self::Late => "지각",
            Self::Absent => "결석",
            Self::Excused => "휴가/공가",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Label for a derived status, where `None` means pending.
#[must_use]
pub fn status_label(status: Option<AttendanceStatus>) -> &'static str {
    status.map_or(PENDING_LABEL, |s| s.label())
}

/// One member's attendance on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Record id, `<date>-<memberId>`.
    pub id: String,
    /// The member.
    pub member_id: MemberId,
    /// The date.
    pub date: NaiveDate,
    /// Recorded status.
    pub status: AttendanceStatus,
    /// Late reason or general note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Check-in time.
    #[serde(default, with = "hhmm")]
    pub check_in_time: Option<NaiveTime>,
    /// Check-out time.
    #[serde(default, with = "hhmm")]
    pub check_out_time: Option<NaiveTime>,
}

impl AttendanceRecord {
    /// Creates a record with no note and no times.
    #[must_use]
    pub fn new(member_id: MemberId, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            id: Self::key(&member_id, date),
            member_id,
            date,
            status,
            note: None,
            check_in_time: None,
            check_out_time: None,
        }
    }

    /// The record id for a (member, date) pair.
    #[must_use]
    pub fn key(member_id: &MemberId, date: NaiveDate) -> String {
        format!("{date}-{member_id}")
    }

    /// Returns true if this record occupies the given (member, date) slot.
    #[must_use]
    pub fn is_for(&self, member_id: &MemberId, date: NaiveDate) -> bool {
        &self.member_id == member_id && self.date == date
    }
}

/// `HH:MM` times; an empty string reads as no time.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_str(&t.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveTime::parse_from_str(s, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
