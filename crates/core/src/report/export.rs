//! CSV exports.
//!
//! Output starts with a UTF-8 BOM so spreadsheet tools pick the right
//! encoding for Korean text.

use std::fmt::Write as _;

use crate::attendance::AttendanceRecord;
use crate::leave::VacationBalance;
use crate::roster::{Member, types::find_member};

const BOM: char = '\u{feff}';

/// Attendance export header.
pub const ATTENDANCE_HEADER: &str =
    "날짜,이름,부서,직급,이용구분,상세장소,상태,비고,출근시간,퇴근시간";

/// Balance export header.
pub const BALANCE_HEADER: &str = "이름,부서,총연차,사용연차,잔여연차";

/// Every attendance record as CSV.
///
/// Rows are ordered by date (newest first), then team, then name. Records
/// whose member is no longer on the roster are left out.
#[must_use]
pub fn attendance_csv(members: &[Member], records: &[AttendanceRecord]) -> String {
    let mut rows: Vec<(&AttendanceRecord, &Member)> = records
        .iter()
        .filter_map(|r| find_member(members, &r.member_id).map(|m| (r, m)))
        .collect();

    rows.sort_by(|(ra, ma), (rb, mb)| {
        rb.date
            .cmp(&ra.date)
            .then_with(|| ma.team.cmp(&mb.team))
            .then_with(|| ma.name.cmp(&mb.name))
    });

    let mut out = String::new();
    out.push(BOM);
    out.push_str(ATTENDANCE_HEADER);
    out.push('\n');

    for (record, member) in rows {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},\"{}\",{},{}",
            record.date,
            member.name,
            member.team,
            member.position,
            member.work_location.as_deref().unwrap_or_default(),
            member.work_place.as_deref().unwrap_or_default(),
            record.status.label(),
            record.note.as_deref().unwrap_or_default(),
            hhmm(record.check_in_time),
            hhmm(record.check_out_time),
        );
    }
    out
}

/// Tab-separated copy of a CSV export, for pasting into a spreadsheet.
#[must_use]
pub fn to_tsv(csv: &str) -> String {
    csv.replace(',', "\t")
}

/// Leave balances as CSV, one row per balance whose member is on the roster.
#[must_use]
pub fn balance_csv(members: &[Member], balances: &[VacationBalance]) -> String {
    let mut out = String::new();
    out.push(BOM);
    out.push_str(BALANCE_HEADER);
    out.push('\n');

    for balance in balances {
        if let Some(member) = find_member(members, &balance.member_id) {
            let _ = writeln!(
                out,
                "{},{},{},{},{}",
                member.name,
                member.team,
                balance.total_days.normalize(),
                balance.used_days.normalize(),
                balance.remaining().normalize(),
            );
        }
    }
    out
}

fn hhmm(time: Option<chrono::NaiveTime>) -> String {
    time.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}
