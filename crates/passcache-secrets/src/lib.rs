//! # Passcache Secrets
//!
//! Generate-once password storage.
//!
//! A lookup term names a record path and, optionally, a length, a character
//! set and a hash scheme. The first lookup of a path generates a password
//! and stores it; every later lookup returns the stored password (or its
//! salted hash).
//!
//! - [`parser`]: lookup terms to [`policy::PasswordPolicy`]
//! - [`charset`]: character groups and alphabets
//! - [`generator`]: secure password and salt sampling
//! - [`store`]: filesystem and in-memory record stores
//! - [`password_store`]: the generate-or-fetch state machine
//! - [`hash`]: the built-in hash backend
//! - [`lookup`]: term-level and batch lookups
//!
//! ## Example
//!
//! ```no_run
//! use passcache_core::GlobalConfig;
//! use passcache_secrets::PasswordLookup;
//!
//! let lookup = PasswordLookup::from_config(GlobalConfig::default());
//! let password = lookup.lookup("credentials/db/admin length=32 chars=ascii_letters,digits")?;
//! # Ok::<(), passcache_types::PasscacheError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod charset;
pub mod policy;
pub mod parser;
pub mod generator;
pub mod hash;
pub mod store;
pub mod transition;
pub mod password_store;
pub mod lookup;

pub use charset::{Alphabet, CharGroup, NamedClass};
pub use policy::PasswordPolicy;
pub use parser::{LookupRequest, ParserDefaults, RequestParser};
pub use generator::PasswordGenerator;
pub use hash::{CryptBackend, HashScheme};
pub use store::{FileRecordStore, MemoryRecordStore};
pub use password_store::{PasswordStore, Resolution};
pub use lookup::PasswordLookup;
