//! Process-wide configuration
//!
//! Controls what a fatal `unwrap` on a failed outcome does and whether new
//! failures are traced. A configuration can be built from TOML, from the
//! environment, or in code, and installed once per process.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use once_cell::sync::OnceCell;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable selecting the unwrap policy (`panic` or `abort`)
pub const UNWRAP_POLICY_VAR: &str = "ERXPECTED_UNWRAP_POLICY";

/// Environment variable enabling failure tracing (`true`/`false`, `1`/`0`)
pub const TRACE_FAILURES_VAR: &str = "ERXPECTED_TRACE_FAILURES";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration was already installed for this process
    #[error("configuration already installed")]
    AlreadyInstalled,

    /// The TOML document could not be parsed
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration file could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A setting had a value outside its accepted set
    #[error("invalid value {value:?} for {setting}")]
    InvalidValue { setting: &'static str, value: String },
}

/// Convenient Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// What `Outcome::unwrap` does when the outcome holds an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnwrapPolicy {
    /// Panic with the rendered error
    #[default]
    Panic,
    /// Log the rendered error and abort the process
    Abort,
}

impl FromStr for UnwrapPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> ConfigResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "panic" => Ok(UnwrapPolicy::Panic),
            "abort" => Ok(UnwrapPolicy::Abort),
            _ => Err(ConfigError::InvalidValue {
                setting: "unwrap_policy",
                value: value.to_string(),
            }),
        }
    }
}

/// Library configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Behavior of `unwrap` on a failed outcome
    pub unwrap_policy: UnwrapPolicy,

    /// Log every newly constructed failure at debug level
    pub trace_failures: bool,
}

static DEFAULT_CONFIG: Config = Config {
    unwrap_policy: UnwrapPolicy::Panic,
    trace_failures: false,
};

static INSTALLED: OnceCell<Config> = OnceCell::new();

impl Config {
    /// Parse a configuration from a TOML document
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Build a configuration from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let mut config = Config::default();

        if let Some(value) = lookup(UNWRAP_POLICY_VAR) {
            config.unwrap_policy = value.parse()?;
        }

        if let Some(value) = lookup(TRACE_FAILURES_VAR) {
            config.trace_failures = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        setting: "trace_failures",
                        value,
                    })
                }
            };
        }

        Ok(config)
    }
}

/// Install the process-wide configuration. Only the first call succeeds.
pub fn install(config: Config) -> ConfigResult<()> {
    INSTALLED
        .set(config)
        .map_err(|_| ConfigError::AlreadyInstalled)?;
    tracing::debug!(config = ?current(), "installed outcome configuration");
    Ok(())
}

/// The installed configuration, or the default one if none was installed
pub fn current() -> &'static Config {
    INSTALLED.get().unwrap_or(&DEFAULT_CONFIG)
}
