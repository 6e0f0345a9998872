//! Storage seams for the ledger.
//!
//! Every collection the ledger reads or writes is behind a trait so the ledger
//! can run against the in-memory store in tests and against a durable backend
//! in the application. Persisted records are the domain types themselves,
//! serialized as-is by the backend.
//!
//! ```text
//! ┌──────────────────┐   ┌────────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ MemberDirectory  │   │ AttendanceStore│   │ BalanceStore │   │ RequestStore │
//! └──────────────────┘   └────────────────┘   └──────────────┘   └──────────────┘
//!          └──────────────────────┴─── LedgerStore ───┴──────────────────┘
//! ```

mod error;
mod memory;

pub use error::StoreError;
pub use memory::InMemoryStore;

use attendo_shared::types::{MemberId, RequestId};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::attendance::AttendanceRecord;
use crate::leave::{VacationBalance, VacationRequest, VacationStatus};
use crate::roster::Member;

/// Which attendance records to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// Every record.
    All,
    /// Records on a single date.
    On(NaiveDate),
}

impl DateFilter {
    /// Returns true if the date passes the filter.
    #[must_use]
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::On(day) => *day == date,
        }
    }
}

/// Read access to the roster, plus wholesale replacement by reset or import.
pub trait MemberDirectory {
    /// Returns all members in roster order.
    fn members(&self) -> Result<Vec<Member>, StoreError>;

    /// Replaces the whole roster.
    fn replace_members(&mut self, members: Vec<Member>) -> Result<(), StoreError>;

    /// Finds one member.
    fn member(&self, id: &MemberId) -> Result<Option<Member>, StoreError> {
        Ok(self.members()?.into_iter().find(|m| &m.id == id))
    }
}

/// Attendance records keyed by (member, date).
pub trait AttendanceStore {
    /// Returns the records passing the filter.
    fn attendance(&self, filter: DateFilter) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// Inserts the record, replacing any record for the same (member, date).
    fn upsert_attendance(&mut self, record: AttendanceRecord) -> Result<(), StoreError>;

    /// Upserts several records. Backends may override this to write once.
    fn upsert_attendance_batch(
        &mut self,
        records: Vec<AttendanceRecord>,
    ) -> Result<(), StoreError> {
        for record in records {
            self.upsert_attendance(record)?;
        }
        Ok(())
    }

    /// Finds the record for one (member, date) slot.
    fn attendance_for(
        &self,
        member_id: &MemberId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        Ok(self
            .attendance(DateFilter::On(date))?
            .into_iter()
            .find(|r| &r.member_id == member_id))
    }
}

/// Per-member leave balances.
pub trait BalanceStore {
    /// Returns every stored balance.
    fn balances(&self) -> Result<Vec<VacationBalance>, StoreError>;

    /// Replaces the stored balances.
    fn save_balances(&mut self, balances: Vec<VacationBalance>) -> Result<(), StoreError>;

    /// Finds a stored balance without creating one.
    fn find_balance(&self, member_id: &MemberId) -> Result<Option<VacationBalance>, StoreError> {
        Ok(self
            .balances()?
            .into_iter()
            .find(|b| &b.member_id == member_id))
    }

    /// Returns the member's balance, creating and saving a default one if absent.
    fn balance(
        &mut self,
        member_id: &MemberId,
        default_total: Decimal,
    ) -> Result<VacationBalance, StoreError> {
        let mut balances = self.balances()?;
        if let Some(found) = balances.iter().find(|b| &b.member_id == member_id) {
            return Ok(found.clone());
        }
        let created = VacationBalance::new(member_id.clone(), default_total);
        balances.push(created.clone());
        self.save_balances(balances)?;
        Ok(created)
    }

    /// Writes one balance back, replacing the member's previous entry.
    fn save_balance(&mut self, balance: VacationBalance) -> Result<(), StoreError> {
        let mut balances = self.balances()?;
        match balances
            .iter_mut()
            .find(|b| b.member_id == balance.member_id)
        {
            Some(slot) => *slot = balance,
            None => balances.push(balance),
        }
        self.save_balances(balances)
    }
}

/// Vacation requests.
pub trait RequestStore {
    /// Returns all requests in submission order.
    fn requests(&self) -> Result<Vec<VacationRequest>, StoreError>;

    /// Appends a newly submitted request.
    fn append_request(&mut self, request: VacationRequest) -> Result<(), StoreError>;

    /// Sets the status of an existing request.
    fn update_request_status(
        &mut self,
        id: RequestId,
        status: VacationStatus,
    ) -> Result<(), StoreError>;

    /// Finds one request.
    fn request(&self, id: RequestId) -> Result<Option<VacationRequest>, StoreError> {
        Ok(self.requests()?.into_iter().find(|r| r.id == id))
    }
}

/// Operator settings kept next to the data.
pub trait SettingsStore {
    /// The saved spreadsheet webhook URL, if any.
    fn sheet_url(&self) -> Result<Option<String>, StoreError>;

    /// Saves the spreadsheet webhook URL; an empty string clears it.
    fn set_sheet_url(&mut self, url: &str) -> Result<(), StoreError>;
}

/// Everything the leave ledger touches.
pub trait LedgerStore: MemberDirectory + AttendanceStore + BalanceStore + RequestStore {}

impl<T> LedgerStore for T where
    T: MemberDirectory + AttendanceStore + BalanceStore + RequestStore
{
}
