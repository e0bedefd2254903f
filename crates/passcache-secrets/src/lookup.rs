//! Term-level lookups.
//!
//! Ties the request parser, path resolution, and the password store
//! together. Each term is independent; [`PasswordLookup::run`] stops at the
//! first failing term while [`PasswordLookup::run_each`] reports every term.

use crate::parser::{ParserDefaults, RequestParser};
use crate::password_store::PasswordStore;
use passcache_core::config::GlobalConfig;
use passcache_types::{RecordState, Result};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::path::{Path, PathBuf};

/// Resolves lookup terms to passwords.
pub struct PasswordLookup<R = OsRng> {
    config: GlobalConfig,
    parser: RequestParser,
    store: PasswordStore<R>,
}

impl PasswordLookup<OsRng> {
    /// Filesystem-backed lookup configured from `config`.
    pub fn from_config(config: GlobalConfig) -> Self {
        Self::new(config, PasswordStore::on_disk())
    }
}

impl<R: RngCore + CryptoRng> PasswordLookup<R> {
    /// Lookup over an explicit store.
    pub fn new(config: GlobalConfig, store: PasswordStore<R>) -> Self {
        let parser = RequestParser::new(ParserDefaults::from(&config));
        Self {
            config,
            parser,
            store,
        }
    }

    /// Record location for a path as written in a term.
    pub fn record_path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.config.resolve_path(path)
    }

    /// Resolve a single term.
    pub fn lookup(&self, term: &str) -> Result<String> {
        let request = self.parser.parse(term)?;
        let path = self.record_path(&request.path);
        tracing::debug!(path = %path.display(), "looking up password");

        let resolution = self.store.resolve(&path, &request.policy)?;
        Ok(resolution.into_value())
    }

    /// Resolve every term, stopping at the first failure.
    pub fn run<S: AsRef<str>>(&self, terms: &[S]) -> Result<Vec<String>> {
        terms.iter().map(|term| self.lookup(term.as_ref())).collect()
    }

    /// Resolve every term independently.
    pub fn run_each<S: AsRef<str>>(&self, terms: &[S]) -> Vec<Result<String>> {
        terms
            .iter()
            .map(|term| {
                let result = self.lookup(term.as_ref());
                if let Err(e) = &result {
                    tracing::warn!(error = %e, "password lookup failed");
                }
                result
            })
            .collect()
    }

    /// State of the record for `path`, without generating anything.
    pub fn inspect(&self, path: impl AsRef<Path>) -> Result<Option<RecordState>> {
        let path = self.record_path(path);
        Ok(self.store.peek(&path)?.map(|record| record.state()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::PasswordGenerator;
    use crate::hash::CryptBackend;
    use crate::store::FileRecordStore;
    use passcache_types::{HashBackend, PasscacheError};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lookup_in(base: &Path) -> PasswordLookup<StdRng> {
        let config = GlobalConfig {
            base_dir: Some(base.to_path_buf()),
            ..Default::default()
        };
        let store = PasswordStore::new(
            Box::new(FileRecordStore::new()),
            Box::new(CryptBackend::with_bcrypt_cost(4)),
            PasswordGenerator::new(StdRng::seed_from_u64(42)),
        );
        PasswordLookup::new(config, store)
    }

    #[test]
    fn test_lookup_writes_under_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let lookup = lookup_in(tmp.path());

        let password = lookup.lookup("creds/db length=12 chars=digits").unwrap();
        assert_eq!(password.len(), 12);
        assert!(password.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("creds/db")).unwrap(),
            format!("{}\n", password)
        );
        assert_eq!(lookup.lookup("creds/db").unwrap(), password);
    }

    #[test]
    fn test_lookup_with_encrypt_returns_hash() {
        let tmp = tempfile::tempdir().unwrap();
        let lookup = lookup_in(tmp.path());

        let password = lookup.lookup("pw").unwrap();
        let hashed = lookup.lookup("pw encrypt=sha256").unwrap();
        let content = std::fs::read_to_string(tmp.path().join("pw")).unwrap();
        let salt = content.trim_end().rsplit('=').next().unwrap();

        assert_eq!(
            hashed,
            CryptBackend::new().hash(&password, "sha256", Some(salt)).unwrap()
        );
        assert_eq!(lookup.inspect("pw").unwrap(), Some(RecordState::Salted));
    }

    #[test]
    fn test_malformed_term_has_no_side_effects() {
        let tmp = tempfile::tempdir().unwrap();
        let lookup = lookup_in(tmp.path());

        let err = lookup.lookup("pw length=10 extra stray").unwrap_err();
        assert!(err.is_request_error());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_run_is_fail_fast() {
        let tmp = tempfile::tempdir().unwrap();
        let lookup = lookup_in(tmp.path());

        let err = lookup.run(&["a", "b badkey=1", "c"]).unwrap_err();
        assert!(matches!(err, PasscacheError::MalformedRequest(_)));
        assert!(tmp.path().join("a").exists());
        assert!(!tmp.path().join("c").exists());

        let values = lookup.run(&["a", "c"]).unwrap();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_run_each_continues() {
        let tmp = tempfile::tempdir().unwrap();
        let lookup = lookup_in(tmp.path());

        let results = lookup.run_each(&["a", "b badkey=1", "c"]);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
        assert!(tmp.path().join("c").exists());
    }

    #[test]
    fn test_inspect_absent_and_unkeyed() {
        let tmp = tempfile::tempdir().unwrap();
        let lookup = lookup_in(tmp.path());

        assert_eq!(lookup.inspect("nothing").unwrap(), None);
        lookup.lookup("plain").unwrap();
        assert_eq!(lookup.inspect("plain").unwrap(), Some(RecordState::Unkeyed));
        assert_eq!(lookup.inspect(tmp.path().join("plain")).unwrap(), Some(RecordState::Unkeyed));
    }
}
