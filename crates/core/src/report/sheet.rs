//! Spreadsheet webhook payload.

use chrono::NaiveDate;
use serde::Serialize;

use crate::attendance::AttendanceRecord;
use crate::roster::Member;

/// One member's attendance on the payload date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRow {
    /// Date, `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Member name.
    pub name: String,
    /// Team.
    pub team: String,
    /// Position.
    pub position: String,
    /// Service type, empty when unset.
    pub work_location: String,
    /// Floor or site, empty when unset.
    pub work_place: String,
    /// Korean status label.
    pub status: String,
    /// Note, empty when unset.
    pub note: String,
    /// `HH:MM` or empty.
    pub check_in_time: String,
    /// `HH:MM` or empty.
    pub check_out_time: String,
}

/// Request body: `{"records": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetPayload {
    /// Rows in roster order.
    pub records: Vec<SheetRow>,
}

impl SheetPayload {
    /// Returns true when no member has a record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Builds the payload for `date`. Members without a record are omitted.
#[must_use]
pub fn sheet_payload(
    members: &[Member],
    records: &[AttendanceRecord],
    date: NaiveDate,
) -> SheetPayload {
    let rows = members
        .iter()
        .filter_map(|member| {
            let record = records.iter().find(|r| r.is_for(&member.id, date))?;
            Some(SheetRow {
                date,
                name: member.name.clone(),
                team: member.team.clone(),
                position: member.position.clone(),
                work_location: member.work_location.clone().unwrap_or_default(),
                work_place: member.work_place.clone().unwrap_or_default(),
                status: record.status.label().to_string(),
                note: record.note.clone().unwrap_or_default(),
                check_in_time: clock(record.check_in_time),
                check_out_time: clock(record.check_out_time),
            })
        })
        .collect();

    SheetPayload { records: rows }
}

fn clock(time: Option<chrono::NaiveTime>) -> String {
    time.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::AttendanceStatus;
    use crate::roster::default_roster;
    use attendo_shared::types::MemberId;
    use chrono::NaiveTime;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_pending_members_are_omitted() {
        let members = default_roster();
        let mut present =
            AttendanceRecord::new(MemberId::from("mem-2"), date(4), AttendanceStatus::Present);
        present.check_in_time = NaiveTime::from_hms_opt(8, 55, 0);
        let records = vec![
            present,
            AttendanceRecord::new(MemberId::from("mem-1"), date(4), AttendanceStatus::Absent),
            AttendanceRecord::new(MemberId::from("mem-3"), date(5), AttendanceStatus::Late),
        ];

        let payload = sheet_payload(&members, &records, date(4));
        assert_eq!(payload.records.len(), 2);
        assert_eq!(payload.records[0].name, members[0].name);
        assert_eq!(payload.records[0].status, "결석");
        assert_eq!(payload.records[1].check_in_time, "08:55");
    }

    #[test]
    fn test_payload_json_shape() {
        let members = default_roster();
        let records = vec![AttendanceRecord::new(
            MemberId::from("mem-1"),
            date(4),
            AttendanceStatus::Excused,
        )];

        let json = serde_json::to_value(sheet_payload(&members, &records, date(4))).unwrap();
        let row = &json["records"][0];
        assert_eq!(row["date"], "2024-03-04");
        assert_eq!(row["status"], "휴가/공가");
        assert_eq!(row["checkOutTime"], "");
        assert!(row.get("workLocation").is_some());
    }

    #[test]
    fn test_empty_day() {
        assert!(sheet_payload(&default_roster(), &[], date(4)).is_empty());
    }
}
