//! Configuration value types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file path, or `None` for stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Log level for this output
    pub level: crate::LogLevel,
    /// Log format (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format with colors
    Pretty,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogLevel;

    #[test]
    fn test_log_config_defaults_to_pretty() {
        let config: LogConfig = serde_yaml::from_str("level: DEBUG\n").unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.path.is_none());
    }

    #[test]
    fn test_log_config_with_file() {
        let config: LogConfig =
            serde_yaml::from_str("path: /var/log/passcache.log\nlevel: WARN\nformat: json\n").unwrap();
        assert_eq!(config.path, Some(PathBuf::from("/var/log/passcache.log")));
        assert_eq!(config.format, LogFormat::Json);
    }
}
