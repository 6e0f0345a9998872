//! Attendance statistics.

use attendo_shared::types::MemberId;
use chrono::NaiveDate;
use serde::Serialize;

use crate::attendance::{AttendanceRecord, AttendanceStatus};
use crate::leave::VacationRequest;
use crate::roster::Member;

/// Counts for one date.
///
/// Only records of members on the roster are counted, so `pending` never
/// goes negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    /// The date.
    pub date: NaiveDate,
    /// PRESENT records.
    pub present: u32,
    /// LATE records.
    pub late: u32,
    /// ABSENT records.
    pub absent: u32,
    /// EXCUSED records.
    pub excused: u32,
    /// Roster size.
    pub total: u32,
}

impl DailyStats {
    /// Members with any record.
    #[must_use]
    pub fn checked(&self) -> u32 {
        self.present + self.late + self.absent + self.excused
    }

    /// Members without a record.
    #[must_use]
    pub fn pending(&self) -> u32 {
        self.total.saturating_sub(self.checked())
    }

    /// Count for one recorded status.
    #[must_use]
    pub fn count(&self, status: AttendanceStatus) -> u32 {
        match status {
            AttendanceStatus::Present => self.present,
            AttendanceStatus::Late => self.late,
            AttendanceStatus::Absent => self.absent,
            AttendanceStatus::Excused => self.excused,
        }
    }
}

/// One member's attendance history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSummary {
    /// The member.
    pub member_id: MemberId,
    /// Count per recorded status, in `AttendanceStatus::ALL` order.
    pub counts: [(AttendanceStatus, u32); 4],
    /// The member's records, newest first.
    pub records: Vec<AttendanceRecord>,
}

/// Statistics over roster and records.
pub struct ReportService;

impl ReportService {
    /// Counts statuses on `date`.
    #[must_use]
    pub fn daily_stats(
        members: &[Member],
        records: &[AttendanceRecord],
        date: NaiveDate,
    ) -> DailyStats {
        let mut stats = DailyStats {
            date,
            present: 0,
            late: 0,
            absent: 0,
            excused: 0,
            total: u32::try_from(members.len()).unwrap_or(u32::MAX),
        };

        for record in records
            .iter()
            .filter(|r| r.date == date && members.iter().any(|m| m.id == r.member_id))
        {
            match record.status {
                AttendanceStatus::Present => stats.present += 1,
                AttendanceStatus::Late => stats.late += 1,
                AttendanceStatus::Absent => stats.absent += 1,
                AttendanceStatus::Excused => stats.excused += 1,
            }
        }
        stats
    }

    /// Members whose derived status on `date` is `status` (`None` = pending).
    #[must_use]
    pub fn members_with_status<'a>(
        members: &'a [Member],
        records: &[AttendanceRecord],
        date: NaiveDate,
        status: Option<AttendanceStatus>,
    ) -> Vec<&'a Member> {
        members
            .iter()
            .filter(|m| {
                let recorded = records
                    .iter()
                    .find(|r| r.is_for(&m.id, date))
                    .map(|r| r.status);
                recorded == status
            })
            .collect()
    }

    /// Status counts and history for one member.
    #[must_use]
    pub fn member_summary(member_id: &MemberId, records: &[AttendanceRecord]) -> MemberSummary {
        let mut own: Vec<AttendanceRecord> = records
            .iter()
            .filter(|r| &r.member_id == member_id)
            .cloned()
            .collect();
        own.sort_by(|a, b| b.date.cmp(&a.date));

        let counts = AttendanceStatus::ALL.map(|status| {
            let n = own.iter().filter(|r| r.status == status).count();
            (status, u32::try_from(n).unwrap_or(u32::MAX))
        });

        MemberSummary {
            member_id: member_id.clone(),
            counts,
            records: own,
        }
    }

    /// Requests waiting on the secretary or the director.
    #[must_use]
    pub fn pending_approval_count(requests: &[VacationRequest]) -> usize {
        requests
            .iter()
            .filter(|r| r.status.is_awaiting_approval())
            .count()
    }
}
