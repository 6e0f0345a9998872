//! JSON-file store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use attendo_core::attendance::AttendanceRecord;
use attendo_core::leave::{VacationBalance, VacationRequest, VacationStatus};
use attendo_core::roster::{Member, default_roster};
use attendo_core::store::{
    AttendanceStore, BalanceStore, DateFilter, MemberDirectory, RequestStore, SettingsStore,
    StoreError,
};
use attendo_shared::types::RequestId;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::keys;

/// Store that keeps one JSON document per collection in a directory.
///
/// Every call reads from or writes to disk; nothing is cached. A single
/// process is expected to own the directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a data directory.
    ///
    /// A directory without a roster is seeded with the built-in one.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::backend(format!("{}: {e}", dir.display())))?;

        let store = Self { dir };
        if !store.path(keys::MEMBERS).exists() {
            let roster = default_roster();
            info!(dir = %store.dir.display(), members = roster.len(), "Seeding default roster");
            store.write(keys::MEMBERS, &roster)?;
        }
        Ok(store)
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Deletes every collection. The next read sees the built-in roster and
    /// nothing else.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        for key in keys::ALL {
            let path = self.path(key);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(StoreError::backend(format!("{}: {e}", path.display()))),
            }
        }
        warn!(dir = %self.dir.display(), "All collections wiped");
        Ok(())
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn read<T>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let path = self.path(key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::backend(format!("{}: {e}", path.display()))),
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StoreError::corrupt(key, e.to_string()))
    }

    fn read_list<T>(&self, key: &str) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        Ok(self.read(key)?.unwrap_or_default())
    }

    fn write<T>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(value)
            .map_err(|e| StoreError::corrupt(key, e.to_string()))?;

        fs::write(&tmp, json)
            .and_then(|()| fs::rename(&tmp, &path))
            .map_err(|e| StoreError::backend(format!("{}: {e}", path.display())))?;
        debug!(key, "Collection saved");
        Ok(())
    }
}

impl MemberDirectory for FileStore {
    fn members(&self) -> Result<Vec<Member>, StoreError> {
        match self.read::<Vec<Member>>(keys::MEMBERS)? {
            Some(members) if !members.is_empty() => Ok(members),
            _ => Ok(default_roster()),
        }
    }

    fn replace_members(&mut self, members: Vec<Member>) -> Result<(), StoreError> {
        self.write(keys::MEMBERS, &members)?;
        info!(members = members.len(), "Roster replaced");
        Ok(())
    }
}

impl AttendanceStore for FileStore {
    fn attendance(&self, filter: DateFilter) -> Result<Vec<AttendanceRecord>, StoreError> {
        let mut records: Vec<AttendanceRecord> = self.read_list(keys::RECORDS)?;
        records.retain(|r| filter.matches(r.date));
        Ok(records)
    }

    fn upsert_attendance(&mut self, record: AttendanceRecord) -> Result<(), StoreError> {
        self.upsert_attendance_batch(vec![record])
    }

    fn upsert_attendance_batch(
        &mut self,
        records: Vec<AttendanceRecord>,
    ) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }
        let mut stored: Vec<AttendanceRecord> = self.read_list(keys::RECORDS)?;
        for record in records {
            match stored
                .iter_mut()
                .find(|r| r.is_for(&record.member_id, record.date))
            {
                Some(slot) => *slot = record,
                None => stored.push(record),
            }
        }
        self.write(keys::RECORDS, &stored)
    }
}

impl BalanceStore for FileStore {
    fn balances(&self) -> Result<Vec<VacationBalance>, StoreError> {
        self.read_list(keys::BALANCES)
    }

    fn save_balances(&mut self, balances: Vec<VacationBalance>) -> Result<(), StoreError> {
        self.write(keys::BALANCES, &balances)
    }
}

impl RequestStore for FileStore {
    fn requests(&self) -> Result<Vec<VacationRequest>, StoreError> {
        self.read_list(keys::VACATIONS)
    }

    fn append_request(&mut self, request: VacationRequest) -> Result<(), StoreError> {
        let mut requests = self.requests()?;
        requests.push(request);
        self.write(keys::VACATIONS, &requests)
    }

    fn update_request_status(
        &mut self,
        id: RequestId,
        status: VacationStatus,
    ) -> Result<(), StoreError> {
        let mut requests = self.requests()?;
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::RequestNotFound(id))?;
        request.status = status;
        self.write(keys::VACATIONS, &requests)
    }
}

impl SettingsStore for FileStore {
    fn sheet_url(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .read::<String>(keys::SHEET_URL)?
            .filter(|url| !url.trim().is_empty()))
    }

    fn set_sheet_url(&mut self, url: &str) -> Result<(), StoreError> {
        let url = url.trim();
        if url.is_empty() {
            let path = self.path(keys::SHEET_URL);
            return match fs::remove_file(&path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(StoreError::backend(format!("{}: {e}", path.display()))),
            };
        }
        self.write(keys::SHEET_URL, url)
    }
}
