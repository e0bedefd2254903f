//! Record inspection.

use anyhow::{Context, Result};
use passcache_core::config::GlobalConfig;
use passcache_secrets::PasswordLookup;

pub async fn execute(config: GlobalConfig, path: String) -> Result<()> {
    let state = tokio::task::spawn_blocking(move || PasswordLookup::from_config(config).inspect(&path))
        .await
        .context("Inspect task failed")??;

    match state {
        Some(state) => println!("{}", state),
        None => println!("absent"),
    }
    Ok(())
}
