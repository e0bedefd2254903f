//! Show version information.

use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("{} {}", passcache_core::APP_NAME, passcache_core::VERSION);
    Ok(())
}
