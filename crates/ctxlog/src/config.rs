//! crates/ctxlog/src/config.rs
//! Startup configuration: default-logger switch and `tracing` subscriber setup.

use crate::dispatch::ContextLogger;

/// Environment variable holding the `tracing` filter directive.
pub const FILTER_ENV: &str = "CTXLOG_FILTER";
/// Environment variable switching the default logger on or off.
pub const DEFAULT_LOGGER_ENV: &str = "CTXLOG_DEFAULT_LOGGER";
/// Conventional filter variable consulted when [`FILTER_ENV`] is unset.
pub const RUST_LOG_ENV: &str = "RUST_LOG";

/// Errors raised while building or installing the logging configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A boolean switch held something other than a recognised on/off word.
    #[error("invalid value '{value}' for {name} (expected 1/true/yes/on or 0/false/no/off)")]
    InvalidSwitch {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
    /// The filter directive could not be parsed.
    #[cfg(feature = "subscriber")]
    #[error("invalid filter directive: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),
    /// A global subscriber was already installed.
    #[cfg(feature = "subscriber")]
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}

/// Logging configuration applied once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Whether contexts without a logger fall back to the standard logger.
    pub default_logger: bool,
    /// `tracing` filter directive, e.g. `info` or `ctxlog=debug,hyper=warn`.
    pub filter: String,
    /// Whether formatted output uses ANSI colours.
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_logger: true,
            filter: "info".to_owned(),
            ansi: false,
        }
    }
}

impl LogConfig {
    /// Create a configuration from a verbose level, as counted from repeated
    /// `-v` flags: 0 shows warnings and errors, each step adds a level.
    pub fn from_verbose_level(level: u8) -> Self {
        let filter = match level {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        Self {
            filter: filter.to_owned(),
            ..Self::default()
        }
    }

    /// Builds a configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// [`FILTER_ENV`] wins over [`RUST_LOG_ENV`]; unset or blank variables
    /// keep the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(filter) = present(FILTER_ENV).or_else(|| present(RUST_LOG_ENV)) {
            config.filter = filter.trim().to_owned();
        }
        if let Some(value) = present(DEFAULT_LOGGER_ENV) {
            config.default_logger = parse_switch(DEFAULT_LOGGER_ENV, &value)?;
        }
        Ok(config)
    }

    /// Applies the default-logger switch to `logger`.
    pub fn apply_default(&self, logger: &ContextLogger) {
        if self.default_logger {
            logger.enable_default();
        } else {
            logger.disable_default();
        }
    }
}

fn parse_switch(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidSwitch {
            name,
            value: value.to_owned(),
        }),
    }
}

/// Install a global `tracing` subscriber for `config` and apply its
/// default-logger switch to the process-wide dispatcher.
///
/// Events are formatted by `tracing-subscriber`'s `fmt` layer and written to
/// standard error.
///
/// # Example
///
/// ```rust,ignore
/// use ctxlog::{LogConfig, init_tracing};
///
/// init_tracing(&LogConfig::from_verbose_level(2))?;
/// ```
#[cfg(feature = "subscriber")]
pub fn init_tracing(config: &LogConfig) -> Result<(), ConfigError> {
    init_tracing_with_layer(config, tracing_subscriber::layer::Identity::new())
}

/// Like [`init_tracing`], with an extra layer installed next to the `fmt`
/// layer (for example a [`CaptureLayer`](crate::capture::CaptureLayer)).
#[cfg(feature = "subscriber")]
pub fn init_tracing_with_layer<L>(config: &LogConfig, layer: L) -> Result<(), ConfigError>
where
    L: tracing_subscriber::Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_new(&config.filter)?;
    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi);

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .with(fmt)
        .try_init()?;

    config.apply_default(crate::dispatch::global());
    Ok(())
}
