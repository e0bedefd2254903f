//! Records stored as one private file per path.

use passcache_core::util::fs::{ensure_private_dir, parent_dir, publish_private_new, write_private_atomic};
use passcache_types::{CreateOutcome, PasscacheError, RecordStore, Result, StoredRecord};
use std::fs;
use std::io;
use std::path::Path;

/// [`RecordStore`] backed by the filesystem.
///
/// New records are published with no-clobber semantics, and rewrites
/// replace the file in one rename, so a reader always sees a complete line.
/// Directories are created with mode 0700 and files with mode 0600.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRecordStore;

impl FileRecordStore {
    /// Create a filesystem record store.
    pub fn new() -> Self {
        Self
    }
}

impl RecordStore for FileRecordStore {
    fn read(&self, path: &Path) -> Result<Option<StoredRecord>> {
        match fs::read_to_string(path) {
            Ok(content) => StoredRecord::parse(&content)
                .map(Some)
                .map_err(|e| match e {
                    PasscacheError::Record(msg) => {
                        PasscacheError::Record(format!("{}: {}", path.display(), msg))
                    }
                    other => other,
                }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            // An ancestor that is not a directory means no record; `create` reports it
            Err(_) if !parent_dir(path).is_dir() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn create(&self, path: &Path, record: &StoredRecord) -> Result<CreateOutcome> {
        ensure_private_dir(parent_dir(path))?;

        if publish_private_new(path, record.encode().as_bytes())? {
            return Ok(CreateOutcome::Created);
        }

        match self.read(path)? {
            Some(existing) => Ok(CreateOutcome::AlreadyExists(existing)),
            None => Err(PasscacheError::Record(format!(
                "{} disappeared while it was being created",
                path.display()
            ))),
        }
    }

    fn replace(&self, path: &Path, record: &StoredRecord) -> Result<()> {
        write_private_atomic(path, record.encode().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(FileRecordStore.read(&tmp.path().join("nothing")).unwrap(), None);
    }

    #[test]
    fn test_file_in_place_of_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let path = blocker.join("sub").join("pw");

        assert_eq!(FileRecordStore.read(&path).unwrap(), None);
        let err = FileRecordStore
            .create(&path, &StoredRecord::unkeyed("abc").unwrap())
            .unwrap_err();
        assert!(matches!(err, PasscacheError::CreateDirectory { .. }));
        assert!(err.to_string().starts_with("cannot create the path for the password lookup"));
    }

    #[test]
    fn test_create_then_lose_race() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("deep").join("er").join("pw");
        let first = StoredRecord::unkeyed("first").unwrap();
        let second = StoredRecord::unkeyed("second").unwrap();

        assert_eq!(FileRecordStore.create(&path, &first).unwrap(), CreateOutcome::Created);
        assert_eq!(
            FileRecordStore.create(&path, &second).unwrap(),
            CreateOutcome::AlreadyExists(first.clone())
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\n");
    }

    #[test]
    fn test_replace_rewrites_in_place() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pw");
        let record = StoredRecord::unkeyed("abc").unwrap();
        FileRecordStore.create(&path, &record).unwrap();

        let salted = record.with_salt("12345678").unwrap();
        FileRecordStore.replace(&path, &salted).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "abc salt=12345678\n");
        assert_eq!(FileRecordStore.read(&path).unwrap(), Some(salted));
    }

    #[cfg(unix)]
    #[test]
    fn test_modes() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("fresh");
        let path = dir.join("pw");
        FileRecordStore
            .create(&path, &StoredRecord::unkeyed("abc").unwrap())
            .unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&dir), 0o700);
        assert_eq!(mode(&path), 0o600);

        FileRecordStore
            .replace(&path, &StoredRecord::unkeyed("def").unwrap())
            .unwrap();
        assert_eq!(mode(&path), 0o600);
    }

    #[test]
    fn test_corrupt_record_names_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pw");
        fs::write(&path, "pw garbage\n").unwrap();
        let err = FileRecordStore.read(&path).unwrap_err();
        assert!(matches!(err, PasscacheError::Record(_)));
        assert!(err.to_string().contains(&*path.to_string_lossy()));
    }
}
