//! In-memory record store.

use parking_lot::Mutex;
use passcache_types::{CreateOutcome, RecordStore, Result, StoredRecord};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// [`RecordStore`] kept in a map. Useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<HashMap<PathBuf, StoredRecord>>,
    creations: Mutex<usize>,
    writes: Mutex<usize>,
}

impl MemoryRecordStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record without counting it as a write.
    pub fn insert(&self, path: impl Into<PathBuf>, record: StoredRecord) {
        self.records.lock().insert(path.into(), record);
    }

    /// Current record at `path`.
    pub fn get(&self, path: &Path) -> Option<StoredRecord> {
        self.records.lock().get(path).cloned()
    }

    /// Number of successful creations.
    pub fn creations(&self) -> usize {
        *self.creations.lock()
    }

    /// Number of writes of any kind.
    pub fn writes(&self) -> usize {
        *self.writes.lock()
    }
}

impl RecordStore for MemoryRecordStore {
    fn read(&self, path: &Path) -> Result<Option<StoredRecord>> {
        Ok(self.get(path))
    }

    fn create(&self, path: &Path, record: &StoredRecord) -> Result<CreateOutcome> {
        let mut records = self.records.lock();
        if let Some(existing) = records.get(path) {
            return Ok(CreateOutcome::AlreadyExists(existing.clone()));
        }
        records.insert(path.to_path_buf(), record.clone());
        *self.creations.lock() += 1;
        *self.writes.lock() += 1;
        Ok(CreateOutcome::Created)
    }

    fn replace(&self, path: &Path, record: &StoredRecord) -> Result<()> {
        self.records.lock().insert(path.to_path_buf(), record.clone());
        *self.writes.lock() += 1;
        Ok(())
    }
}
