//! Configuration management for passcache.
//!
//! This module provides multi-layer configuration support with:
//! - File-based configuration (YAML)
//! - Environment variable overrides
//! - Programmatic updates
//!
//! ## Configuration Layers
//!
//! Configuration values are resolved in this priority order:
//! 1. Environment variables
//! 2. Programmatically set values
//! 3. Values loaded from file
//! 4. Default values
//!
//! ## Example
//!
//! ```no_run
//! use passcache_core::config::{Config, GlobalConfig};
//!
//! let mut config = Config::load(GlobalConfig::default_path())?.with_env_overrides()?;
//! config.set("default_length", 32)?;
//!
//! let length: usize = config.get("default_length").unwrap_or(20);
//! let global = config.to_global()?;
//! # Ok::<(), passcache_core::PasscacheError>(())
//! ```

use passcache_types::{PasscacheError, Result};
use passcache_types::config::LogConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Password length used when a request does not name one.
pub const DEFAULT_LENGTH: usize = 20;

/// Character groups used when a request does not name any.
pub const DEFAULT_CHARS: &[&str] = &["ascii_letters", "digits", ".,:-_"];

/// Environment variable overriding `base_dir`.
pub const ENV_BASE_DIR: &str = "PASSCACHE_BASE_DIR";

/// Environment variable overriding `default_length`.
pub const ENV_DEFAULT_LENGTH: &str = "PASSCACHE_DEFAULT_LENGTH";

/// Configuration layer priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLayer {
    /// Default values
    Default = 0,
    /// Values loaded from file
    Loaded = 1,
    /// Values set programmatically
    Set = 2,
    /// Values from environment variables
    Environment = 3,
}

impl ConfigLayer {
    const BY_PRIORITY: [ConfigLayer; 4] = [
        ConfigLayer::Environment,
        ConfigLayer::Set,
        ConfigLayer::Loaded,
        ConfigLayer::Default,
    ];
}

/// Layered configuration store.
///
/// This is the low-level configuration type. Use [`Config::to_global`] to
/// get the typed view.
#[derive(Clone, Debug)]
pub struct Config {
    layers: HashMap<ConfigLayer, Value>,
    file_path: Option<PathBuf>,
}

impl Config {
    /// Configuration holding only the built-in defaults.
    pub fn defaults() -> Result<Self> {
        let defaults = serde_json::to_value(GlobalConfig::default())?;
        let mut layers = HashMap::new();
        layers.insert(ConfigLayer::Default, defaults);
        Ok(Self {
            layers,
            file_path: None,
        })
    }

    /// Load configuration from a YAML file on top of the defaults.
    ///
    /// If the file doesn't exist, only the defaults are present.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::defaults()?;

        if path.exists() {
            let value = crate::util::data::load_yaml_file(path)
                .map_err(|e| PasscacheError::Config(format!("Failed to load config: {}", e)))?;

            config.layers.insert(ConfigLayer::Loaded, value);
            tracing::debug!(path = %path.display(), "loaded configuration file");
        }

        config.file_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_env_vars(std::env::vars())
    }

    /// Apply overrides from the given environment variables.
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut overrides = serde_json::Map::new();

        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                ENV_BASE_DIR => {
                    overrides.insert("base_dir".to_string(), Value::String(value.to_string()));
                }
                ENV_DEFAULT_LENGTH => {
                    let length: usize = value.parse().map_err(|_| {
                        PasscacheError::Config(format!(
                            "{} must be a positive integer, got {:?}",
                            ENV_DEFAULT_LENGTH, value
                        ))
                    })?;
                    overrides.insert("default_length".to_string(), Value::from(length));
                }
                _ => {}
            }
        }

        if !overrides.is_empty() {
            self.layers.insert(ConfigLayer::Environment, Value::Object(overrides));
        }
        Ok(self)
    }

    /// Get a configuration value by key, respecting layer priority.
    ///
    /// Returns None if the key doesn't exist in any layer.
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        for layer in &ConfigLayer::BY_PRIORITY {
            if let Some(layer_data) = self.layers.get(layer) {
                if let Some(value) = crate::util::data::get_path(layer_data, key) {
                    if let Ok(typed_value) = serde_json::from_value(value.clone()) {
                        return Some(typed_value);
                    }
                }
            }
        }

        None
    }

    /// Set a configuration value programmatically.
    pub fn set(&mut self, key: &str, value: impl Serialize) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| PasscacheError::Config(format!("Failed to serialize value: {}", e)))?;

        let set_layer = self
            .layers
            .entry(ConfigLayer::Set)
            .or_insert(Value::Object(Default::default()));

        Self::set_value_at_path(set_layer, key, value)
    }

    /// Path this configuration was loaded from, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Get merged data from all layers.
    pub fn merged_data(&self) -> Value {
        let mut merged = Value::Object(serde_json::Map::new());

        for layer in ConfigLayer::BY_PRIORITY.iter().rev() {
            if let Some(layer_data) = self.layers.get(layer) {
                merged = crate::util::data::deep_merge(merged, layer_data.clone());
            }
        }

        merged
    }

    /// Typed view of the merged configuration.
    pub fn to_global(&self) -> Result<GlobalConfig> {
        let global: GlobalConfig = serde_json::from_value(self.merged_data())
            .map_err(|e| PasscacheError::Config(format!("Failed to parse configuration: {}", e)))?;
        global.validate()?;
        Ok(global)
    }

    // Helper: Set value at dotted path
    fn set_value_at_path(data: &mut Value, path: &str, value: Value) -> Result<()> {
        let parts: Vec<&str> = path.split('.').collect();
        let (last, parents) = match parts.split_last() {
            Some((last, parents)) if !last.is_empty() => (*last, parents),
            _ => return Err(PasscacheError::Config("Empty path".to_string())),
        };

        // Navigate to parent, creating intermediate objects as needed
        let mut current = data;
        for part in parents {
            if !current.is_object() {
                *current = Value::Object(Default::default());
            }
            current = match current {
                Value::Object(map) => map
                    .entry(part.to_string())
                    .or_insert_with(|| Value::Object(Default::default())),
                _ => passcache_types::bug!("config layer is not an object at {}", part),
            };
        }

        if !current.is_object() {
            *current = Value::Object(Default::default());
        }
        if let Value::Object(map) = current {
            map.insert(last.to_string(), value);
        }

        Ok(())
    }
}

/// Global passcache configuration (~/.passcache/config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Directory relative record paths are resolved against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,

    /// Password length when a request has no `length=`
    #[serde(default = "default_length")]
    pub default_length: usize,

    /// Character groups when a request has no `chars=`
    #[serde(default = "default_chars")]
    pub default_chars: Vec<String>,

    /// Log configurations
    #[serde(default)]
    pub logs: Vec<LogConfig>,
}

fn default_length() -> usize {
    DEFAULT_LENGTH
}

fn default_chars() -> Vec<String> {
    DEFAULT_CHARS.iter().map(|s| s.to_string()).collect()
}

impl GlobalConfig {
    /// Load global configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path())
    }

    /// Load global configuration from a specific path, with environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Config::load(path)?.with_env_overrides()?.to_global()
    }

    /// Get the default path for global configuration.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".passcache")
            .join("config")
    }

    /// Reject values no request could be built from.
    pub fn validate(&self) -> Result<()> {
        if self.default_length == 0 {
            return Err(PasscacheError::Config("default_length must be greater than 0".to_string()));
        }
        if self.default_chars.iter().all(|group| group.is_empty()) {
            return Err(PasscacheError::Config("default_chars must not be empty".to_string()));
        }
        Ok(())
    }

    /// Resolve a record path against `base_dir`.
    ///
    /// Absolute paths and paths with a leading tilde ignore `base_dir`.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = crate::util::fs::expand_path(path);
        match &self.base_dir {
            Some(base) if path.is_relative() => crate::util::fs::expand_path(base).join(path),
            _ => path,
        }
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            default_length: DEFAULT_LENGTH,
            default_chars: default_chars(),
            logs: Vec::new(),
        }
    }
}
