//! Common utility functions.

pub mod data;
pub mod fs;

// Re-export commonly used items
pub use data::{load_yaml, load_yaml_file, deep_merge};
pub use fs::{expand_path, slurp, ensure_private_dir, write_private_atomic, publish_private_new};
