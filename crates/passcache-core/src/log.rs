//! Logging system for passcache.
//!
//! Structured logging through `tracing`, written to stderr by default or to
//! any number of configured outputs. Passwords and salts are never logged.

use passcache_types::config::{LogConfig, LogFormat};
use passcache_types::{LogLevel, PasscacheError, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "passcache=info";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the logging system with default configuration.
///
/// Honors `RUST_LOG`; falls back to [`DEFAULT_FILTER`].
pub fn init_default() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    init_with_filter(filter)
}

/// Initialize logging to stderr at a fixed level.
pub fn init_with_level(level: LogLevel) -> Result<()> {
    init_with_filter(EnvFilter::new(format!("passcache={}", level.as_directive())))
}

/// Initialize logging from configuration.
///
/// With no configured outputs this is [`init_default`].
pub fn init_from_config(configs: &[LogConfig]) -> Result<()> {
    if configs.is_empty() {
        return init_default();
    }

    let layers = configs
        .iter()
        .map(build_layer)
        .collect::<Result<Vec<_>>>()?;

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| PasscacheError::Config(format!("Failed to initialize logging: {}", e)))
}

fn init_with_filter(filter: EnvFilter) -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init()
        .map_err(|e| PasscacheError::Config(format!("Failed to initialize logging: {}", e)))
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::None => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

fn build_layer(config: &LogConfig) -> Result<BoxedLayer> {
    let filter = level_filter(config.level);

    let Some(path) = &config.path else {
        let layer = fmt::layer().with_writer(std::io::stderr);
        return Ok(match config.format {
            LogFormat::Pretty => layer.pretty().with_filter(filter).boxed(),
            LogFormat::Json => layer.json().with_filter(filter).boxed(),
            LogFormat::Compact => layer.compact().with_filter(filter).boxed(),
        });
    };

    let path = crate::util::fs::expand_path(path);
    let file_name = path.file_name().ok_or_else(|| {
        PasscacheError::Config(format!("Log path has no file name: {}", path.display()))
    })?;
    let dir = crate::util::fs::parent_dir(&path);
    crate::util::fs::ensure_private_dir(dir)?;

    let writer = tracing_appender::rolling::never(dir, file_name);
    let layer = fmt::layer().with_writer(writer).with_ansi(false);
    Ok(match config.format {
        LogFormat::Pretty => layer.pretty().with_filter(filter).boxed(),
        LogFormat::Json => layer.json().with_filter(filter).boxed(),
        LogFormat::Compact => layer.compact().with_filter(filter).boxed(),
    })
}
