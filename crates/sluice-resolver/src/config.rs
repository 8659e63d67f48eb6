//! Resolver configuration.
//!
//! Provides [`ResolverConfig`] with defaults for the chain id, deadline
//! enforcement and logging. Values can be layered from an optional config
//! file and `SLUICE_*` environment variables, with the file lowest.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, Map};
use serde::{Deserialize, Serialize};
use sluice_core::constants::DEFAULT_CHAIN_ID;

/// Environment variable prefix, e.g. `SLUICE_CHAIN_ID`.
pub const ENV_PREFIX: &str = "SLUICE";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Configuration for a resolver instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Chain the resolver quotes for. Snapshots from any other chain are
    /// refused, and cosignatures are verified against this id.
    pub chain_id: u64,
    /// Reject orders whose deadline is before the snapshot timestamp.
    pub enforce_deadline: bool,
    /// Log level filter string (e.g. "info", "debug", "sluice_resolver=trace").
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            enforce_deadline: true,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl ResolverConfig {
    /// Default location of the config file, `<config dir>/sluice/sluice.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sluice")
            .join("sluice.toml")
    }

    /// Load from `path` (required if given, otherwise the default path if it
    /// exists) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Self::load) but reads environment values from `env`
    /// instead of the process environment when given.
    pub fn load_with_env(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::from(Self::default_path()).required(false)),
        };
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env),
        );
        builder.build()?.try_deserialize()
    }
}
