//! In-memory store.

use attendo_shared::types::RequestId;

use super::{
    AttendanceStore, BalanceStore, DateFilter, MemberDirectory, RequestStore, SettingsStore,
    StoreError,
};
use crate::attendance::AttendanceRecord;
use crate::leave::{VacationBalance, VacationRequest, VacationStatus};
use crate::roster::{Member, default_roster};

/// Store that keeps every collection in memory.
///
/// Never fails; used by tests and as a scratch store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    members: Vec<Member>,
    records: Vec<AttendanceRecord>,
    requests: Vec<VacationRequest>,
    balances: Vec<VacationBalance>,
    sheet_url: Option<String>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given roster.
    #[must_use]
    pub fn with_members(members: Vec<Member>) -> Self {
        Self {
            members,
            ..Self::default()
        }
    }

    /// Creates a store holding the built-in roster.
    #[must_use]
    pub fn with_default_roster() -> Self {
        Self::with_members(default_roster())
    }

    /// Drops every collection.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }
}

impl MemberDirectory for InMemoryStore {
    fn members(&self) -> Result<Vec<Member>, StoreError> {
        Ok(self.members.clone())
    }

    fn replace_members(&mut self, members: Vec<Member>) -> Result<(), StoreError> {
        self.members = members;
        Ok(())
    }
}

impl AttendanceStore for InMemoryStore {
    fn attendance(&self, filter: DateFilter) -> Result<Vec<AttendanceRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|r| filter.matches(r.date))
            .cloned()
            .collect())
    }

    fn upsert_attendance(&mut self, record: AttendanceRecord) -> Result<(), StoreError> {
        match self
            .records
            .iter_mut()
            .find(|r| r.is_for(&record.member_id, record.date))
        {
            Some(slot) => *slot = record,
            None => self.records.push(record),
        }
        Ok(())
    }
}

impl BalanceStore for InMemoryStore {
    fn balances(&self) -> Result<Vec<VacationBalance>, StoreError> {
        Ok(self.balances.clone())
    }

    fn save_balances(&mut self, balances: Vec<VacationBalance>) -> Result<(), StoreError> {
        self.balances = balances;
        Ok(())
    }
}

impl RequestStore for InMemoryStore {
    fn requests(&self) -> Result<Vec<VacationRequest>, StoreError> {
        Ok(self.requests.clone())
    }

    fn append_request(&mut self, request: VacationRequest) -> Result<(), StoreError> {
        self.requests.push(request);
        Ok(())
    }

    fn update_request_status(
        &mut self,
        id: RequestId,
        status: VacationStatus,
    ) -> Result<(), StoreError> {
        let request = self
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::RequestNotFound(id))?;
        request.status = status;
        Ok(())
    }
}

impl SettingsStore for InMemoryStore {
    fn sheet_url(&self) -> Result<Option<String>, StoreError> {
        Ok(self.sheet_url.clone())
    }

    fn set_sheet_url(&mut self, url: &str) -> Result<(), StoreError> {
        let url = url.trim();
        self.sheet_url = (!url.is_empty()).then(|| url.to_string());
        Ok(())
    }
}
