//! The on-disk password record.
//!
//! A record is a single line of UTF-8 text terminated by a newline, in one
//! of two forms:
//!
//! ```text
//! <password>
//! <password> salt=<salt>
//! ```
//!
//! The password never contains whitespace, so the first space is always the
//! field separator.

use crate::errors::{PasscacheError, Result};
use std::fmt;

/// Prefix of the salt field.
pub const SALT_FIELD: &str = "salt=";

/// Whether a record carries a salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordState {
    /// Bare password, no salt field
    Unkeyed,
    /// Password followed by a `salt=` field
    Salted,
}

impl fmt::Display for RecordState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordState::Unkeyed => write!(f, "unkeyed"),
            RecordState::Salted => write!(f, "salted"),
        }
    }
}

/// A password and its optional salt, as persisted at a record path.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredRecord {
    password: String,
    salt: Option<String>,
}

impl StoredRecord {
    /// Create a record without a salt.
    pub fn unkeyed(password: impl Into<String>) -> Result<Self> {
        let password = password.into();
        validate_password(&password)?;
        Ok(Self { password, salt: None })
    }

    /// Create a record with a salt.
    pub fn salted(password: impl Into<String>, salt: impl Into<String>) -> Result<Self> {
        let password = password.into();
        let salt = salt.into();
        validate_password(&password)?;
        validate_salt(&salt)?;
        Ok(Self { password, salt: Some(salt) })
    }

    /// Parse record file content.
    ///
    /// Trailing whitespace is ignored. If a space is present, everything
    /// before the first space is the password and everything after the last
    /// `=` of the remainder is the salt. An empty salt counts as no salt.
    pub fn parse(content: &str) -> Result<Self> {
        let content = content.trim_end();
        if content.is_empty() {
            return Err(PasscacheError::Record("record is empty".to_string()));
        }

        match content.split_once(' ') {
            Some((password, rest)) => {
                let (_, salt) = rest.rsplit_once('=').ok_or_else(|| {
                    PasscacheError::Record(format!("unrecognized field after password: {}", rest))
                })?;
                if salt.is_empty() {
                    Self::unkeyed(password)
                } else {
                    Self::salted(password, salt)
                }
            }
            None => Self::unkeyed(content),
        }
    }

    /// Encode as file content, including the trailing newline.
    pub fn encode(&self) -> String {
        match &self.salt {
            Some(salt) => format!("{} {}{}\n", self.password, SALT_FIELD, salt),
            None => format!("{}\n", self.password),
        }
    }

    /// The stored password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// The stored salt, if any.
    pub fn salt(&self) -> Option<&str> {
        self.salt.as_deref()
    }

    /// Whether this record is salted.
    pub fn state(&self) -> RecordState {
        if self.salt.is_some() {
            RecordState::Salted
        } else {
            RecordState::Unkeyed
        }
    }

    /// Same password with the given salt.
    pub fn with_salt(&self, salt: impl Into<String>) -> Result<Self> {
        Self::salted(self.password.clone(), salt)
    }

    /// Same password with the salt field removed.
    pub fn without_salt(&self) -> Self {
        Self {
            password: self.password.clone(),
            salt: None,
        }
    }
}

impl fmt::Debug for StoredRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredRecord")
            .field("password", &"<redacted>")
            .field("state", &self.state())
            .finish()
    }
}

fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(PasscacheError::Record("password is empty".to_string()));
    }
    if password.chars().any(char::is_whitespace) {
        return Err(PasscacheError::Record(
            "password contains whitespace and cannot be stored unambiguously".to_string(),
        ));
    }
    Ok(())
}

fn validate_salt(salt: &str) -> Result<()> {
    if salt.is_empty() || salt.chars().any(|c| c.is_whitespace() || c == '=') {
        return Err(PasscacheError::Record(format!("invalid salt: {:?}", salt)));
    }
    Ok(())
}
