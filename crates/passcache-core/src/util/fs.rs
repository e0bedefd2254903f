//! Filesystem utilities.
//!
//! Everything written through this module is private to the owner:
//! directories are created with mode 0700 and files with mode 0600. Files
//! are staged in a temporary file next to their destination and moved into
//! place in one step, so they never exist with looser permissions or with
//! partial content.

use passcache_types::{PasscacheError, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Mode for directories created on behalf of records.
pub const PRIVATE_DIR_MODE: u32 = 0o700;

/// Mode for record files.
pub const PRIVATE_FILE_MODE: u32 = 0o600;

/// Expand a leading tilde to the home directory.
pub fn expand_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }

    path.to_path_buf()
}

/// Read entire file as string (slurp).
pub fn slurp(path: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(path).map_err(Into::into)
}

/// Directory a file lives in; `.` for bare file names.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Create `dir` and any missing ancestors with mode 0700.
///
/// Existing directories are left as they are.
pub fn ensure_private_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(PRIVATE_DIR_MODE);
    }

    builder.create(dir).map_err(|source| PasscacheError::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })?;

    tracing::debug!(dir = %dir.display(), "created private directory");
    Ok(())
}

/// Write `contents` to `path` with mode 0600, replacing any existing file.
pub fn write_private_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let staged = stage_private(path, contents)?;
    staged.persist(path).map_err(|e| PasscacheError::Io(e.error))?;
    Ok(())
}

/// Write `contents` to `path` with mode 0600 only if `path` does not exist.
///
/// Returns `false` without touching the existing file when `path` is
/// already taken. Of several concurrent callers exactly one gets `true`.
pub fn publish_private_new(path: &Path, contents: &[u8]) -> Result<bool> {
    let staged = stage_private(path, contents)?;
    match staged.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(PasscacheError::Io(e.error)),
    }
}

fn stage_private(path: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let mut staged = tempfile::Builder::new()
        .prefix(".passcache-")
        .tempfile_in(parent_dir(path))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(fs::Permissions::from_mode(PRIVATE_FILE_MODE))?;
    }

    staged.write_all(contents)?;
    staged.as_file().sync_all()?;
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn mode_of(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn test_parent_dir_of_bare_name() {
        assert_eq!(parent_dir(Path::new("secret")), Path::new("."));
        assert_eq!(parent_dir(Path::new("a/b/secret")), Path::new("a/b"));
    }

    #[test]
    fn test_ensure_private_dir_creates_ancestors() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("one").join("two");
        ensure_private_dir(&dir).unwrap();
        assert!(dir.is_dir());
        #[cfg(unix)]
        {
            assert_eq!(mode_of(&dir), PRIVATE_DIR_MODE);
            assert_eq!(mode_of(&tmp.path().join("one")), PRIVATE_DIR_MODE);
        }
        // Idempotent
        ensure_private_dir(&dir).unwrap();
    }

    #[test]
    fn test_ensure_private_dir_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let err = ensure_private_dir(&blocker.join("sub")).unwrap_err();
        match err {
            PasscacheError::CreateDirectory { path, .. } => assert_eq!(path, blocker.join("sub")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_write_private_atomic_replaces_content() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("record");
        write_private_atomic(&path, b"first\n").unwrap();
        write_private_atomic(&path, b"second\n").unwrap();
        assert_eq!(slurp(&path).unwrap(), "second\n");
        #[cfg(unix)]
        assert_eq!(mode_of(&path), PRIVATE_FILE_MODE);
    }

    #[test]
    fn test_publish_private_new_never_clobbers() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("record");
        assert!(publish_private_new(&path, b"winner\n").unwrap());
        assert!(!publish_private_new(&path, b"loser\n").unwrap());
        assert_eq!(slurp(&path).unwrap(), "winner\n");
        #[cfg(unix)]
        assert_eq!(mode_of(&path), PRIVATE_FILE_MODE);

        // No staging files left behind
        let leftovers: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_expand_path_leaves_plain_paths() {
        assert_eq!(expand_path("/etc/passcache"), PathBuf::from("/etc/passcache"));
        assert_eq!(expand_path("relative/dir"), PathBuf::from("relative/dir"));
    }
}
