//! CLI structure and command definitions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use passcache_core::config::GlobalConfig;
use passcache_types::LogLevel;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "passcache")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate-once password store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: ~/.passcache/config)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Return the password for each term, generating it on first use
    Lookup {
        /// Terms of the form `<path> [length=N] [chars=GROUPS] [encrypt=SCHEME]`
        #[arg(required = true)]
        terms: Vec<String>,

        /// Directory relative paths are resolved against
        #[arg(short, long)]
        base_dir: Option<PathBuf>,

        /// Keep going after a failing term
        #[arg(short, long)]
        keep_going: bool,
    },

    /// Show whether a record exists and whether it is salted
    Inspect {
        /// Record path
        path: String,

        /// Directory relative paths are resolved against
        #[arg(short, long)]
        base_dir: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,

    /// Show version information
    Version,
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        use crate::commands::*;

        let config = self.load_config()?;
        self.init_logging(&config)?;

        match &self.command {
            Commands::Lookup { terms, base_dir, keep_going } => {
                lookup::execute(with_base_dir(config, base_dir), terms.clone(), *keep_going).await
            }
            Commands::Inspect { path, base_dir } => {
                inspect::execute(with_base_dir(config, base_dir), path.clone()).await
            }
            Commands::Config => {
                config::execute(&config)
            }
            Commands::Version => {
                version::execute()
            }
        }
    }

    fn load_config(&self) -> Result<GlobalConfig> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(GlobalConfig::default_path);
        GlobalConfig::load_from(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    }

    fn init_logging(&self, config: &GlobalConfig) -> Result<()> {
        let level = if self.debug {
            Some(LogLevel::Debug)
        } else if self.verbose {
            Some(LogLevel::Info)
        } else if self.quiet {
            Some(LogLevel::Error)
        } else {
            None
        };

        match level {
            Some(level) => passcache_core::log::init_with_level(level)?,
            None => passcache_core::log::init_from_config(&config.logs)?,
        }
        Ok(())
    }
}

fn with_base_dir(mut config: GlobalConfig, base_dir: &Option<PathBuf>) -> GlobalConfig {
    if let Some(dir) = base_dir {
        config.base_dir = Some(dir.clone());
    }
    config
}
