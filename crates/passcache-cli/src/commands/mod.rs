//! CLI command implementations.

pub mod lookup;
pub mod inspect;
pub mod config;
pub mod version;
