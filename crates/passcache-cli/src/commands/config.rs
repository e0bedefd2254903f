//! Print the effective configuration.

use anyhow::{Context, Result};
use passcache_core::config::GlobalConfig;

pub fn execute(config: &GlobalConfig) -> Result<()> {
    let yaml = serde_yaml::to_string(config).context("Failed to serialize configuration")?;
    print!("{}", yaml);
    Ok(())
}
