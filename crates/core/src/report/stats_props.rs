//! Property-based tests for daily statistics.

use attendo_shared::types::MemberId;
use chrono::NaiveDate;
use proptest::prelude::*;

use super::stats::ReportService;
use crate::attendance::{AttendanceRecord, AttendanceStatus};
use crate::roster::default_roster;

fn arb_status() -> impl Strategy<Value = AttendanceStatus> {
    prop_oneof![
        Just(AttendanceStatus::Present),
        Just(AttendanceStatus::Late),
        Just(AttendanceStatus::Absent),
        Just(AttendanceStatus::Excused),
    ]
}

/// At most one record per member, for a random subset of the roster.
fn arb_day() -> impl Strategy<Value = Vec<Option<AttendanceStatus>>> {
    prop::collection::vec(prop::option::of(arb_status()), 40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Counted plus pending equals the roster size, and drill-down lists
    /// agree with the counts.
    #[test]
    fn prop_counts_partition_roster(day in arb_day()) {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let members = default_roster();
        let records: Vec<AttendanceRecord> = day
            .iter()
            .enumerate()
            .filter_map(|(i, status)| {
                status.map(|s| {
                    AttendanceRecord::new(MemberId::new(format!("mem-{}", i + 1)), date, s)
                })
            })
            .collect();

        let stats = ReportService::daily_stats(&members, &records, date);
        prop_assert_eq!(stats.checked() + stats.pending(), stats.total);
        prop_assert_eq!(stats.checked() as usize, records.len());

        for status in AttendanceStatus::ALL {
            let listed = ReportService::members_with_status(&members, &records, date, Some(status));
            prop_assert_eq!(listed.len(), stats.count(status) as usize);
        }
        let pending = ReportService::members_with_status(&members, &records, date, None);
        prop_assert_eq!(pending.len(), stats.pending() as usize);
    }
}
