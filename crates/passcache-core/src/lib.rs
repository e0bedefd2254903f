//! # Passcache Core
//!
//! Core utilities, configuration management, and logging for passcache.
//!
//! This crate provides:
//!
//! - **Configuration**: Layered configuration (defaults, file, programmatic, environment)
//! - **Logging**: Structured logging to stderr or files
//! - **File Operations**: Private directories, atomic private writes, YAML handling
//!
//! ## Example
//!
//! ```no_run
//! use passcache_core::config::GlobalConfig;
//!
//! let config = GlobalConfig::load()?;
//! passcache_core::log::init_from_config(&config.logs)?;
//! # Ok::<(), passcache_core::PasscacheError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod log;
pub mod util;

// Re-export commonly used items
pub use config::{Config, GlobalConfig};
pub use passcache_types::{PasscacheError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "passcache";
