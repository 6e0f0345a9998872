//! File store persistence tests.
//!
//! Tests reopen the data directory to prove state survives on disk, or damage
//! a collection file to check that a failed ledger call can be retried.

use attendo_core::attendance::{AttendanceRecord, AttendanceStatus};
use attendo_core::leave::{LeaveApplication, LeaveError, LeaveLedger, VacationStatus};
use attendo_core::roster::Member;
use attendo_core::store::{
    AttendanceStore, BalanceStore, DateFilter, MemberDirectory, RequestStore, SettingsStore,
    StoreError,
};
use attendo_shared::types::{MemberId, RequestId};
use attendo_store::FileStore;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[test]
fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = FileStore::open(dir.path()).unwrap();
        store
            .upsert_attendance(AttendanceRecord::new(
                MemberId::from("mem-1"),
                date(4),
                AttendanceStatus::Late,
            ))
            .unwrap();
        store
            .upsert_attendance(AttendanceRecord::new(
                MemberId::from("mem-1"),
                date(4),
                AttendanceStatus::Present,
            ))
            .unwrap();
    }

    let store = FileStore::open(dir.path()).unwrap();
    let records = store.attendance(DateFilter::All).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, AttendanceStatus::Present);
    assert_eq!(records[0].id, "2024-03-04-mem-1");
}

#[test]
fn test_leave_lifecycle_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = LeaveLedger::default();
    let member = MemberId::from("mem-5");

    let id = {
        let mut store = FileStore::open(dir.path()).unwrap();
        let submission = ledger
            .submit(
                &mut store,
                LeaveApplication {
                    member_id: member.clone(),
                    start_date: date(4),
                    end_date: date(8),
                    leave_type: "연차".to_string(),
                    reason: "가족 여행".to_string(),
                },
            )
            .unwrap();
        assert!(submission.warning.is_none());
        ledger
            .approve_by_secretary(&mut store, submission.request.id)
            .unwrap();
        submission.request.id
    };

    let mut store = FileStore::open(dir.path()).unwrap();
    assert_eq!(
        store.request(id).unwrap().unwrap().status,
        VacationStatus::SecretaryApproved
    );
    ledger.approve_final(&mut store, id).unwrap();

    let store = FileStore::open(dir.path()).unwrap();
    let balance = store.find_balance(&member).unwrap().unwrap();
    assert_eq!(balance.used_days, dec!(5));
    assert_eq!(balance.remaining(), dec!(10));
    assert_eq!(store.attendance(DateFilter::All).unwrap().len(), 5);

    let raw = std::fs::read_to_string(dir.path().join("attendance_app_vacation_balances.json"))
        .unwrap();
    assert!(raw.contains("\"usedDays\": 5.0"));
}

#[test]
fn test_replace_members_and_wipe() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();

    store
        .replace_members(vec![Member {
            id: MemberId::from("mem-imp-1-1"),
            name: "홍길동".to_string(),
            team: "영업팀".to_string(),
            position: "사원".to_string(),
            work_location: None,
            work_place: None,
        }])
        .unwrap();
    store.set_sheet_url("https://script.invalid/exec").unwrap();
    assert_eq!(FileStore::open(dir.path()).unwrap().members().unwrap().len(), 1);

    store.clear_all().unwrap();
    assert_eq!(store.members().unwrap().len(), 40);
    assert_eq!(store.sheet_url().unwrap(), None);
    assert!(store.requests().unwrap().is_empty());
}

/// Submits a Mon–Fri 연차 request for `member` and passes the secretary stage.
fn secretary_approved(
    store: &mut FileStore,
    ledger: &LeaveLedger,
    member: &MemberId,
) -> RequestId {
    let id = ledger
        .submit(
            store,
            LeaveApplication {
                member_id: member.clone(),
                start_date: date(4),
                end_date: date(8),
                leave_type: "연차".to_string(),
                reason: "가족 여행".to_string(),
            },
        )
        .unwrap()
        .request
        .id;
    ledger.approve_by_secretary(store, id).unwrap();
    id
}

#[test]
fn test_final_approval_with_unreadable_records_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = LeaveLedger::default();
    let member = MemberId::from("mem-5");
    let mut store = FileStore::open(dir.path()).unwrap();
    let id = secretary_approved(&mut store, &ledger, &member);

    let records_file = dir.path().join("attendance_app_records.json");
    std::fs::write(&records_file, "{bad").unwrap();

    let err = ledger.approve_final(&mut store, id).unwrap_err();
    assert!(matches!(err, LeaveError::Store(StoreError::Corrupt { .. })));
    assert_eq!(
        store.request(id).unwrap().unwrap().status,
        VacationStatus::SecretaryApproved
    );
    assert!(store.find_balance(&member).unwrap().is_none());

    std::fs::write(&records_file, "[]").unwrap();
    ledger.approve_final(&mut store, id).unwrap();
    assert_eq!(
        store.find_balance(&member).unwrap().unwrap().used_days,
        dec!(5)
    );
    assert_eq!(store.attendance(DateFilter::All).unwrap().len(), 5);

    assert!(matches!(
        ledger.approve_final(&mut store, id),
        Err(LeaveError::InvalidTransition { .. })
    ));
    assert_eq!(
        store.find_balance(&member).unwrap().unwrap().used_days,
        dec!(5)
    );
}

#[test]
fn test_failed_balance_write_can_be_retried_once() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = LeaveLedger::default();
    let member = MemberId::from("mem-6");
    let mut store = FileStore::open(dir.path()).unwrap();
    let id = secretary_approved(&mut store, &ledger, &member);

    // Occupy the temporary path so the balance write fails while reads work.
    let blocker = dir.path().join("attendance_app_vacation_balances.json.tmp");
    std::fs::create_dir(&blocker).unwrap();

    let err = ledger.approve_final(&mut store, id).unwrap_err();
    assert!(matches!(err, LeaveError::Store(StoreError::Backend(_))));
    assert_eq!(
        store.request(id).unwrap().unwrap().status,
        VacationStatus::SecretaryApproved
    );
    assert!(store.find_balance(&member).unwrap().is_none());

    std::fs::remove_dir(&blocker).unwrap();
    let applied = ledger.approve_final(&mut store, id).unwrap().applied.unwrap();
    assert_eq!(applied.deducted, Some(dec!(5)));
    assert_eq!(
        store.find_balance(&member).unwrap().unwrap().used_days,
        dec!(5)
    );
    assert_eq!(store.attendance(DateFilter::All).unwrap().len(), 5);
    assert_eq!(
        store.request(id).unwrap().unwrap().status,
        VacationStatus::FinalApproved
    );
}
