//! Error types for passcache operations.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for passcache operations.
///
/// Request errors are raised before anything touches the filesystem.
/// Everything else is fatal to the single lookup that produced it.
#[derive(Error, Debug)]
pub enum PasscacheError {
    /// The lookup term could not be turned into a valid request
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// The parent directory of a record could not be created
    #[error("cannot create the path for the password lookup: {} (error was {source})", path.display())]
    CreateDirectory {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// A stored record could not be understood
    #[error("Record error: {0}")]
    Record(String),

    /// The hash backend rejected its input
    #[error("Hash error: {0}")]
    Hash(String),

    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal bug - should never happen in production
    #[error("Bug detected: {0}\n\nThis is an internal error. Please report this issue.")]
    Bug(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl PasscacheError {
    /// Whether this error was raised while parsing a request, before any side effects.
    pub fn is_request_error(&self) -> bool {
        matches!(self, PasscacheError::MalformedRequest(_))
    }
}

/// A specialized Result type for passcache operations.
pub type Result<T> = std::result::Result<T, PasscacheError>;

/// Helper macro to create and return a PasscacheError::Bug
///
/// This should be used for conditions that should never occur
/// in normal operation and indicate a bug in passcache itself.
///
/// # Example
///
/// ```ignore
/// if some_impossible_condition {
///     bug!("This should never happen: {:?}", condition);
/// }
/// ```
#[macro_export]
macro_rules! bug {
    ($msg:expr) => {
        return Err($crate::PasscacheError::Bug($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::PasscacheError::Bug(format!($fmt, $($arg)*)))
    };
}

/// Helper macro to bail out with a PasscacheError
///
/// This is used for expected error conditions.
///
/// # Example
///
/// ```ignore
/// if !valid {
///     bail!(MalformedRequest, "Invalid length: {}", value);
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::PasscacheError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::PasscacheError::$variant(format!($fmt, $($arg)*)))
    };
    ($msg:expr) => {
        return Err($crate::PasscacheError::Other($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::PasscacheError::Other(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reject(key: &str) -> Result<()> {
        bail!(MalformedRequest, "Unrecognized parameter(s) given to password lookup: {}", key);
    }

    #[test]
    fn test_bail_builds_variant() {
        let err = reject("badkey").unwrap_err();
        assert!(err.is_request_error());
        assert_eq!(
            err.to_string(),
            "Malformed request: Unrecognized parameter(s) given to password lookup: badkey"
        );
    }

    #[test]
    fn test_create_directory_message_carries_os_error() {
        let err = PasscacheError::CreateDirectory {
            path: PathBuf::from("/nope/dir"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nope/dir"));
        assert!(msg.contains("Permission denied"));
        assert!(!err.is_request_error());
    }
}
