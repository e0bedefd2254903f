//! Built-in hash backend.
//!
//! Output is a pure function of `(plaintext, scheme, salt)`, so hashes can
//! always be re-derived from a stored record. The `*_crypt` schemes produce
//! standard crypt(3) strings that system verifiers accept.

use passcache_types::{HashBackend, PasscacheError, Result};
use sha2::{Digest, Sha256, Sha512};
use sha1::Sha1;
use sha_crypt::{sha256_crypt_b64, sha512_crypt_b64, CryptError, Sha256Params, Sha512Params};
use std::fmt;
use std::str::FromStr;

/// Supported hash schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashScheme {
    /// Salted SHA-1, hex encoded
    Sha1,
    /// Salted SHA-256, hex encoded
    Sha256,
    /// Salted SHA-512, hex encoded
    Sha512,
    /// bcrypt, `$2b$` format
    Bcrypt,
    /// SHA-256 crypt, `$5$` format
    Sha256Crypt,
    /// SHA-512 crypt, `$6$` format
    Sha512Crypt,
}

impl FromStr for HashScheme {
    type Err = PasscacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sha1" => Ok(HashScheme::Sha1),
            "sha256" => Ok(HashScheme::Sha256),
            "sha512" => Ok(HashScheme::Sha512),
            "bcrypt" => Ok(HashScheme::Bcrypt),
            "sha256_crypt" => Ok(HashScheme::Sha256Crypt),
            "sha512_crypt" => Ok(HashScheme::Sha512Crypt),
            _ => Err(PasscacheError::Hash(format!("Unsupported hash scheme: {}", s))),
        }
    }
}

impl fmt::Display for HashScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashScheme::Sha1 => write!(f, "sha1"),
            HashScheme::Sha256 => write!(f, "sha256"),
            HashScheme::Sha512 => write!(f, "sha512"),
            HashScheme::Bcrypt => write!(f, "bcrypt"),
            HashScheme::Sha256Crypt => write!(f, "sha256_crypt"),
            HashScheme::Sha512Crypt => write!(f, "sha512_crypt"),
        }
    }
}

/// bcrypt work factor used by [`CryptBackend::new`].
pub const BCRYPT_COST: u32 = 10;

/// crypt(3) default rounds; the only count that needs no `rounds=` field.
const CRYPT_ROUNDS: usize = 5_000;

/// Longest salt crypt(3) uses; longer salts are truncated.
pub const CRYPT_SALT_MAX: usize = 16;

/// Default [`HashBackend`].
#[derive(Debug, Clone)]
pub struct CryptBackend {
    bcrypt_cost: u32,
}

impl CryptBackend {
    /// Backend with bcrypt cost [`BCRYPT_COST`].
    pub fn new() -> Self {
        Self {
            bcrypt_cost: BCRYPT_COST,
        }
    }

    /// Backend with a custom bcrypt cost (4 to 31).
    pub fn with_bcrypt_cost(cost: u32) -> Self {
        Self { bcrypt_cost: cost }
    }

    fn digest<D: Digest>(scheme: HashScheme, plaintext: &str, salt: Option<&str>) -> String {
        let salt = salt.unwrap_or("");
        let mut hasher = D::new();
        hasher.update(salt.as_bytes());
        hasher.update(plaintext.as_bytes());
        format!("${}${}${}", scheme, salt, hex::encode(hasher.finalize()))
    }

    fn bcrypt(&self, plaintext: &str, salt: Option<&str>) -> Result<String> {
        let salt = salt.ok_or_else(|| PasscacheError::Hash("bcrypt requires a salt".to_string()))?;

        // bcrypt wants exactly 16 salt bytes; derive them from the stored salt
        let mut salt_bytes = [0u8; 16];
        salt_bytes.copy_from_slice(&Sha256::digest(salt.as_bytes())[..16]);

        let parts = bcrypt::hash_with_salt(plaintext, self.bcrypt_cost, salt_bytes)
            .map_err(|e| PasscacheError::Hash(format!("Failed to bcrypt hash: {}", e)))?;
        Ok(parts.format_for_version(bcrypt::Version::TwoB))
    }

    fn sha_crypt(scheme: HashScheme, plaintext: &str, salt: Option<&str>) -> Result<String> {
        let salt = salt.ok_or_else(|| PasscacheError::Hash(format!("{} requires a salt", scheme)))?;
        let end = salt.char_indices().nth(CRYPT_SALT_MAX).map_or(salt.len(), |(i, _)| i);
        let salt = &salt[..end];
        let failed = |e: CryptError| PasscacheError::Hash(format!("Failed to {} hash: {:?}", scheme, e));

        let (id, digest) = match scheme {
            HashScheme::Sha256Crypt => {
                let params = Sha256Params::new(CRYPT_ROUNDS).map_err(failed)?;
                ("5", sha256_crypt_b64(plaintext.as_bytes(), salt.as_bytes(), &params).map_err(failed)?)
            }
            HashScheme::Sha512Crypt => {
                let params = Sha512Params::new(CRYPT_ROUNDS).map_err(failed)?;
                ("6", sha512_crypt_b64(plaintext.as_bytes(), salt.as_bytes(), &params).map_err(failed)?)
            }
            other => passcache_types::bug!("{} is not a crypt(3) scheme", other),
        };
        Ok(format!("${}${}${}", id, salt, digest))
    }
}

impl Default for CryptBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HashBackend for CryptBackend {
    fn hash(&self, plaintext: &str, scheme: &str, salt: Option<&str>) -> Result<String> {
        let scheme: HashScheme = scheme.parse()?;
        match scheme {
            HashScheme::Sha1 => Ok(Self::digest::<Sha1>(scheme, plaintext, salt)),
            HashScheme::Sha256 => Ok(Self::digest::<Sha256>(scheme, plaintext, salt)),
            HashScheme::Sha512 => Ok(Self::digest::<Sha512>(scheme, plaintext, salt)),
            HashScheme::Bcrypt => self.bcrypt(plaintext, salt),
            HashScheme::Sha256Crypt | HashScheme::Sha512Crypt => {
                Self::sha_crypt(scheme, plaintext, salt)
            }
        }
    }
}
