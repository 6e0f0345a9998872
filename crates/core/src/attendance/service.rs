//! Manual attendance entry.
//!
//! Approved leave owns its slots: once a (member, date) record is EXCUSED,
//! manual marking with another status is refused. Only the leave ledger
//! writes EXCUSED over other statuses.

use attendo_shared::types::MemberId;
use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info};

use super::error::AttendanceError;
use super::types::{AttendanceRecord, AttendanceStatus};
use crate::store::{AttendanceStore, MemberDirectory};

/// A manual status entry for one member on one date.
///
/// `None` fields keep whatever the existing record holds.
#[derive(Debug, Clone)]
pub struct AttendanceEntry {
    /// The member.
    pub member_id: MemberId,
    /// The date.
    pub date: NaiveDate,
    /// Status to record.
    pub status: AttendanceStatus,
    /// Note.
    pub note: Option<String>,
    /// Check-in time.
    pub check_in_time: Option<NaiveTime>,
    /// Check-out time.
    pub check_out_time: Option<NaiveTime>,
}

impl AttendanceEntry {
    /// An entry that sets only the status.
    #[must_use]
    pub fn status(member_id: MemberId, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            member_id,
            date,
            status,
            note: None,
            check_in_time: None,
            check_out_time: None,
        }
    }
}

/// Which clock time an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    /// Check-in.
    CheckIn,
    /// Check-out.
    CheckOut,
}

/// Result of a batch operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Members whose record was written.
    pub marked: Vec<MemberId>,
    /// Members left untouched because they are on leave.
    pub skipped: Vec<MemberId>,
}

/// Stateless attendance operations over a store.
pub struct AttendanceService;

impl AttendanceService {
    /// Records a manual status.
    ///
    /// Existing note and times are kept unless the entry supplies new ones.
    /// Marking PRESENT without any check-in time stamps `now`.
    ///
    /// # Errors
    /// * `MemberNotFound` for an id not on the roster
    /// * `ExcusedLocked` when the slot holds leave and `status` is not EXCUSED
    pub fn mark<S>(
        store: &mut S,
        entry: AttendanceEntry,
        now: NaiveTime,
    ) -> Result<AttendanceRecord, AttendanceError>
    where
        S: MemberDirectory + AttendanceStore,
    {
        if store.member(&entry.member_id)?.is_none() {
            return Err(AttendanceError::MemberNotFound(entry.member_id));
        }

        let existing = store.attendance_for(&entry.member_id, entry.date)?;
        let record = Self::merge(existing, entry, now)?;
        store.upsert_attendance(record.clone())?;

        info!(
            member_id = %record.member_id,
            date = %record.date,
            status = %record.status,
            "Attendance marked"
        );
        Ok(record)
    }

    /// Applies one status to several members on a date.
    ///
    /// Members on leave are skipped and reported. All ids are checked
    /// against the roster before anything is written.
    pub fn mark_batch<S>(
        store: &mut S,
        member_ids: &[MemberId],
        date: NaiveDate,
        status: AttendanceStatus,
        now: NaiveTime,
    ) -> Result<BatchOutcome, AttendanceError>
    where
        S: MemberDirectory + AttendanceStore,
    {
        Self::ensure_members(store, member_ids)?;

        let mut outcome = BatchOutcome::default();
        let mut records = Vec::with_capacity(member_ids.len());

        for member_id in member_ids {
            let existing = store.attendance_for(member_id, date)?;
            let entry = AttendanceEntry::status(member_id.clone(), date, status);
            match Self::merge(existing, entry, now) {
                Ok(record) => {
                    outcome.marked.push(member_id.clone());
                    records.push(record);
                }
                Err(AttendanceError::ExcusedLocked { .. }) => {
                    outcome.skipped.push(member_id.clone());
                }
                Err(err) => return Err(err),
            }
        }

        store.upsert_attendance_batch(records)?;
        info!(
            date = %date,
            status = %status,
            marked = outcome.marked.len(),
            skipped = outcome.skipped.len(),
            "Batch attendance marked"
        );
        Ok(outcome)
    }

    /// Sets one clock time for several members on a date.
    ///
    /// Members without a record get a PRESENT record. Members on leave are
    /// skipped.
    pub fn set_time_batch<S>(
        store: &mut S,
        member_ids: &[MemberId],
        date: NaiveDate,
        field: TimeField,
        time: NaiveTime,
    ) -> Result<BatchOutcome, AttendanceError>
    where
        S: MemberDirectory + AttendanceStore,
    {
        Self::ensure_members(store, member_ids)?;

        let mut outcome = BatchOutcome::default();
        let mut records = Vec::with_capacity(member_ids.len());

        for member_id in member_ids {
            let mut record = match store.attendance_for(member_id, date)? {
                Some(existing) if existing.status == AttendanceStatus::Excused => {
                    outcome.skipped.push(member_id.clone());
                    continue;
                }
                Some(existing) => existing,
                None => AttendanceRecord::new(member_id.clone(), date, AttendanceStatus::Present),
            };
            Self::set_field(&mut record, field, Some(time));
            outcome.marked.push(member_id.clone());
            records.push(record);
        }

        store.upsert_attendance_batch(records)?;
        info!(
            date = %date,
            field = ?field,
            marked = outcome.marked.len(),
            skipped = outcome.skipped.len(),
            "Batch time entered"
        );
        Ok(outcome)
    }

    /// Replaces the note on an existing record; an empty note clears it.
    pub fn update_note<S>(
        store: &mut S,
        member_id: &MemberId,
        date: NaiveDate,
        note: &str,
    ) -> Result<AttendanceRecord, AttendanceError>
    where
        S: AttendanceStore,
    {
        let mut record = Self::existing(store, member_id, date)?;
        let note = note.trim();
        record.note = (!note.is_empty()).then(|| note.to_string());
        store.upsert_attendance(record.clone())?;
        debug!(member_id = %member_id, date = %date, "Attendance note updated");
        Ok(record)
    }

    /// Sets or clears a clock time on an existing record.
    pub fn update_time<S>(
        store: &mut S,
        member_id: &MemberId,
        date: NaiveDate,
        field: TimeField,
        time: Option<NaiveTime>,
    ) -> Result<AttendanceRecord, AttendanceError>
    where
        S: AttendanceStore,
    {
        let mut record = Self::existing(store, member_id, date)?;
        Self::set_field(&mut record, field, time);
        store.upsert_attendance(record.clone())?;
        debug!(member_id = %member_id, date = %date, field = ?field, "Attendance time updated");
        Ok(record)
    }

    /// Derived status: `None` means pending.
    pub fn status_for<S>(
        store: &S,
        member_id: &MemberId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceStatus>, AttendanceError>
    where
        S: AttendanceStore,
    {
        Ok(store.attendance_for(member_id, date)?.map(|r| r.status))
    }

    fn merge(
        existing: Option<AttendanceRecord>,
        entry: AttendanceEntry,
        now: NaiveTime,
    ) -> Result<AttendanceRecord, AttendanceError> {
        let mut record = match existing {
            Some(found)
                if found.status == AttendanceStatus::Excused
                    && entry.status != AttendanceStatus::Excused =>
            {
                return Err(AttendanceError::ExcusedLocked {
                    member_id: entry.member_id,
                    date: entry.date,
                });
            }
            Some(found) => found,
            None => AttendanceRecord::new(entry.member_id.clone(), entry.date, entry.status),
        };

        record.status = entry.status;
        if entry.note.is_some() {
            record.note = entry.note.filter(|n| !n.trim().is_empty());
        }
        record.check_in_time = entry.check_in_time.or(record.check_in_time);
        record.check_out_time = entry.check_out_time.or(record.check_out_time);
        if record.status == AttendanceStatus::Present && record.check_in_time.is_none() {
            record.check_in_time = Some(now);
        }
        Ok(record)
    }

    fn ensure_members<S>(store: &S, member_ids: &[MemberId]) -> Result<(), AttendanceError>
    where
        S: MemberDirectory,
    {
        let members = store.members()?;
        match member_ids
            .iter()
            .find(|id| !members.iter().any(|m| &m.id == *id))
        {
            Some(missing) => Err(AttendanceError::MemberNotFound(missing.clone())),
            None => Ok(()),
        }
    }

    fn existing<S>(
        store: &S,
        member_id: &MemberId,
        date: NaiveDate,
    ) -> Result<AttendanceRecord, AttendanceError>
    where
        S: AttendanceStore,
    {
        store
            .attendance_for(member_id, date)?
            .ok_or_else(|| AttendanceError::RecordNotFound {
                member_id: member_id.clone(),
                date,
            })
    }

    fn set_field(record: &mut AttendanceRecord, field: TimeField, time: Option<NaiveTime>) {
        match field {
            TimeField::CheckIn => record.check_in_time = time,
            TimeField::CheckOut => record.check_out_time = time,
        }
    }
}
