//! Property-based tests for the leave ledger.
//!
//! - The advisory estimate at submission equals the deduction at approval
//! - Final approval writes one EXCUSED record per business day

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::ledger::{LeaveApplication, LeaveLedger};
use crate::attendance::AttendanceStatus;
use crate::store::{AttendanceStore, BalanceStore, DateFilter, InMemoryStore};
use attendo_shared::types::MemberId;

/// Strategy for a start date within 2024 and a span of up to three weeks.
fn date_range() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (0i64..366, 0i64..21).prop_map(|(offset, span)| {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset);
        (start, start + Duration::days(span))
    })
}

fn leave_type() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("연차"), Just("반차"), Just("반차(오후)"), Just("공가"), Just("병가")]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The days quoted at submission are exactly the days debited at approval.
    #[test]
    fn prop_estimate_matches_deduction(
        (start, end) in date_range(),
        kind in leave_type(),
    ) {
        let ledger = LeaveLedger::default();
        let mut store = InMemoryStore::with_default_roster();
        let member = MemberId::from("mem-7");

        let estimate = ledger.policy().days_required(kind, start, end);
        let id = ledger
            .submit(&mut store, LeaveApplication {
                member_id: member.clone(),
                start_date: start,
                end_date: end,
                leave_type: kind.to_string(),
                reason: String::new(),
            })
            .unwrap()
            .request
            .id;
        ledger.approve_by_secretary(&mut store, id).unwrap();
        let applied = ledger.approve_final(&mut store, id).unwrap().applied.unwrap();

        prop_assert_eq!(applied.deducted, estimate);
        let used = store
            .find_balance(&member)
            .unwrap()
            .map_or(Decimal::ZERO, |b| b.used_days);
        prop_assert_eq!(used, estimate.unwrap_or(Decimal::ZERO));
    }

    /// Every weekday in range, and nothing else, becomes EXCUSED.
    #[test]
    fn prop_records_cover_business_days((start, end) in date_range()) {
        let ledger = LeaveLedger::default();
        let mut store = InMemoryStore::with_default_roster();

        let id = ledger
            .submit(&mut store, LeaveApplication {
                member_id: MemberId::from("mem-3"),
                start_date: start,
                end_date: end,
                leave_type: "공가".to_string(),
                reason: String::new(),
            })
            .unwrap()
            .request
            .id;
        ledger.approve_by_secretary(&mut store, id).unwrap();
        ledger.approve_final(&mut store, id).unwrap();

        let records = store.attendance(DateFilter::All).unwrap();
        let weekdays = start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .count();
        prop_assert_eq!(records.len(), weekdays);
        prop_assert!(records.iter().all(|r| r.status == AttendanceStatus::Excused));
        prop_assert!(records.iter().all(|r| r.date >= start && r.date <= end));
    }
}
