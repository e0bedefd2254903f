//! Generate-or-fetch password store.

use crate::generator::PasswordGenerator;
use crate::hash::CryptBackend;
use crate::policy::PasswordPolicy;
use crate::store::FileRecordStore;
use crate::transition::{next_action, Action};
use parking_lot::Mutex;
use passcache_types::{CreateOutcome, HashBackend, RecordStore, Result, StoredRecord};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::path::Path;

/// Outcome of [`PasswordStore::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Record as stored after the call
    pub record: StoredRecord,
    /// Hash of the password, when the policy asked for one
    pub hash: Option<String>,
    /// Whether this call created the record
    pub created: bool,
}

impl Resolution {
    /// The value handed back to callers: the hash if there is one,
    /// otherwise the password.
    pub fn into_value(self) -> String {
        match self.hash {
            Some(hash) => hash,
            None => self.record.password().to_string(),
        }
    }
}

/// Returns the password stored at a path, creating it on first use.
///
/// The record is normalized on every call: a salt is added when the policy
/// asks for a hash and stripped when it does not. The password itself never
/// changes once written.
pub struct PasswordStore<R = OsRng> {
    records: Box<dyn RecordStore>,
    hasher: Box<dyn HashBackend>,
    generator: Mutex<PasswordGenerator<R>>,
}

impl PasswordStore<OsRng> {
    /// Filesystem-backed store with the built-in hash backend.
    pub fn on_disk() -> Self {
        Self::new(
            Box::new(FileRecordStore::new()),
            Box::new(CryptBackend::new()),
            PasswordGenerator::from_os(),
        )
    }
}

impl<R: RngCore + CryptoRng> PasswordStore<R> {
    /// Assemble a store from its collaborators.
    pub fn new(
        records: Box<dyn RecordStore>,
        hasher: Box<dyn HashBackend>,
        generator: PasswordGenerator<R>,
    ) -> Self {
        Self {
            records,
            hasher,
            generator: Mutex::new(generator),
        }
    }

    /// Return the password at `path` under `policy`, creating or
    /// normalizing the record as needed.
    pub fn resolve(&self, path: &Path, policy: &PasswordPolicy) -> Result<Resolution> {
        let current = self.records.read(path)?;
        let (record, created) = self.settle(path, current, policy)?;

        let hash = match policy.hash_scheme() {
            Some(scheme) => Some(self.hasher.hash(record.password(), scheme, record.salt())?),
            None => None,
        };

        Ok(Resolution {
            record,
            hash,
            created,
        })
    }

    /// Read the record at `path` without changing anything.
    pub fn peek(&self, path: &Path) -> Result<Option<StoredRecord>> {
        self.records.read(path)
    }

    fn settle(
        &self,
        path: &Path,
        current: Option<StoredRecord>,
        policy: &PasswordPolicy,
    ) -> Result<(StoredRecord, bool)> {
        let action = next_action(current.as_ref().map(StoredRecord::state), policy.requires_salt());
        tracing::debug!(path = %path.display(), ?action, "settling password record");

        match (action, current) {
            (Action::Create, _) => self.create(path, policy),
            (Action::AddSalt, Some(record)) => {
                let salted = record.with_salt(self.generator.lock().salt())?;
                self.records.replace(path, &salted)?;
                tracing::info!(path = %path.display(), "added salt to password record");
                Ok((salted, false))
            }
            (Action::StripSalt, Some(record)) => {
                let bare = record.without_salt();
                self.records.replace(path, &bare)?;
                tracing::info!(path = %path.display(), "removed salt from password record");
                Ok((bare, false))
            }
            (Action::Keep, Some(record)) => Ok((record, false)),
            (action, None) => passcache_types::bug!(
                "{:?} planned for missing record {}",
                action,
                path.display()
            ),
        }
    }

    fn create(&self, path: &Path, policy: &PasswordPolicy) -> Result<(StoredRecord, bool)> {
        let record = {
            let mut generator = self.generator.lock();
            let password = generator.password(policy.alphabet(), policy.length());
            if policy.requires_salt() {
                StoredRecord::salted(password, generator.salt())?
            } else {
                StoredRecord::unkeyed(password)?
            }
        };

        match self.records.create(path, &record)? {
            CreateOutcome::Created => {
                tracing::info!(
                    path = %path.display(),
                    length = policy.length(),
                    salted = policy.requires_salt(),
                    "created password record"
                );
                Ok((record, true))
            }
            CreateOutcome::AlreadyExists(existing) => {
                tracing::warn!(path = %path.display(), "password record was created concurrently, using it");
                let (record, _) = self.settle(path, Some(existing), policy)?;
                Ok((record, false))
            }
        }
    }
}
