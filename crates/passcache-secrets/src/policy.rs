//! Password policy.

use crate::charset::{Alphabet, CharGroup};
use passcache_types::{PasscacheError, Result};

/// What to generate and whether to hash it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    length: usize,
    groups: Vec<CharGroup>,
    alphabet: Alphabet,
    hash_scheme: Option<String>,
}

impl PasswordPolicy {
    /// Build a validated policy.
    ///
    /// `length` must be positive and `groups` must resolve to a usable
    /// alphabet.
    pub fn new(length: usize, groups: Vec<CharGroup>, hash_scheme: Option<String>) -> Result<Self> {
        if length == 0 {
            return Err(PasscacheError::MalformedRequest(
                "length must be greater than 0".to_string(),
            ));
        }
        if matches!(hash_scheme.as_deref(), Some("")) {
            return Err(PasscacheError::MalformedRequest(
                "encrypt requires a scheme name".to_string(),
            ));
        }
        let alphabet = Alphabet::resolve(&groups)?;

        Ok(Self {
            length,
            groups,
            alphabet,
            hash_scheme,
        })
    }

    /// Password length in characters.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Character groups in request order.
    pub fn groups(&self) -> &[CharGroup] {
        &self.groups
    }

    /// Resolved sampling alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Requested hash scheme.
    pub fn hash_scheme(&self) -> Option<&str> {
        self.hash_scheme.as_deref()
    }

    /// Records for this policy must carry a salt.
    pub fn requires_salt(&self) -> bool {
        self.hash_scheme.is_some()
    }
}

#[cfg(test)]
impl PasswordPolicy {
    /// Policy a bare term gets under the built-in defaults.
    pub(crate) fn standard() -> Self {
        use passcache_core::config::{DEFAULT_CHARS, DEFAULT_LENGTH};

        let groups = DEFAULT_CHARS.iter().map(|t| CharGroup::from_token(t)).collect();
        Self::new(DEFAULT_LENGTH, groups, None).unwrap()
    }
}
