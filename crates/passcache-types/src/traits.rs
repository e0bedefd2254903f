//! Core trait definitions for passcache collaborators.

use std::path::Path;
use std::sync::Arc;
use crate::errors::Result;
use crate::record::StoredRecord;

/// Result of an atomic create-if-absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// This caller published the record
    Created,
    /// Another caller got there first; carries the record it published
    AlreadyExists(StoredRecord),
}

/// Storage for password records, one record per path.
///
/// Implementations must make [`RecordStore::create`] atomic: when several
/// callers race to create the same path, exactly one sees
/// [`CreateOutcome::Created`] and every other caller gets the winner's record.
/// Readers must never observe a partially written record.
pub trait RecordStore: Send + Sync {
    /// Read the record at `path`, or `None` if there is none.
    fn read(&self, path: &Path) -> Result<Option<StoredRecord>>;

    /// Publish `record` at `path` only if nothing is stored there yet.
    fn create(&self, path: &Path, record: &StoredRecord) -> Result<CreateOutcome>;

    /// Overwrite the existing record at `path`.
    fn replace(&self, path: &Path, record: &StoredRecord) -> Result<()>;
}

/// Hash/encrypt backend.
///
/// Must be a pure function of its inputs so that a hash can be re-derived
/// from a stored password and salt.
pub trait HashBackend: Send + Sync {
    /// Hash `plaintext` with the named `scheme`.
    fn hash(&self, plaintext: &str, scheme: &str, salt: Option<&str>) -> Result<String>;
}

impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    fn read(&self, path: &Path) -> Result<Option<StoredRecord>> {
        (**self).read(path)
    }

    fn create(&self, path: &Path, record: &StoredRecord) -> Result<CreateOutcome> {
        (**self).create(path, record)
    }

    fn replace(&self, path: &Path, record: &StoredRecord) -> Result<()> {
        (**self).replace(path, record)
    }
}

impl<T: HashBackend + ?Sized> HashBackend for Arc<T> {
    fn hash(&self, plaintext: &str, scheme: &str, salt: Option<&str>) -> Result<String> {
        (**self).hash(plaintext, scheme, salt)
    }
}
