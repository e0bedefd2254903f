//! # Passcache Types
//!
//! Core types, traits, and enums shared across all passcache crates.
//!
//! This crate provides the fundamental building blocks for the passcache
//! password store, including:
//!
//! - The on-disk record format and its explicit salt state
//! - Collaborator traits for record storage and hash backends
//! - Common enums for log levels
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use passcache_types::{RecordState, StoredRecord};
//!
//! let record = StoredRecord::parse("hunter2 salt=abcd1234\n").unwrap();
//! assert_eq!(record.password(), "hunter2");
//! assert_eq!(record.state(), RecordState::Salted);
//! assert_eq!(record.encode(), "hunter2 salt=abcd1234\n");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod enums;
pub mod record;
pub mod traits;
pub mod config;

// Re-export common types for convenience
pub use errors::{PasscacheError, Result};
pub use enums::LogLevel;
pub use record::{RecordState, StoredRecord};
pub use traits::{CreateOutcome, HashBackend, RecordStore};
