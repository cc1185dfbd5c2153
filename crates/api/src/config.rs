//! Service Configuration
//!
//! Defaults, overridden by an optional TOML file, overridden by
//! `CAR_PRICE__SECTION__KEY` environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::rate_limit::RateLimitConfig;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "CAR_PRICE_CONFIG";

/// Config file used when [`CONFIG_PATH_ENV`] is unset
pub const DEFAULT_CONFIG_FILE: &str = "car-price-engine.toml";

const ENV_PREFIX: &str = "CAR_PRICE";

/// Top-level settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub artifacts: ArtifactSettings,
    pub encoding: EncodingSettings,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingSettings,
    pub metrics: MetricsSettings,
}

/// Listening address
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerSettings {
    /// `host:port` for binding
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Model and schema locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactSettings {
    /// Model file name (`.onnx` or `.json`)
    pub model_file: String,
    /// Column schema file name
    pub columns_file: String,
    /// Directories searched in order for both files
    pub search_dirs: Vec<PathBuf>,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            model_file: "Car_prices_model.onnx".to_string(),
            columns_file: "Car_columns.json".to_string(),
            search_dirs: vec![
                PathBuf::from("Model"),
                PathBuf::from("model"),
                PathBuf::from("../Model"),
            ],
        }
    }
}

/// Feature encoding behaviour
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EncodingSettings {
    /// Reject unknown make/model/condition values with 400
    pub strict_categories: bool,
}

/// Log output
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON lines instead of text
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Prometheus exporter
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    pub enabled: bool,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Settings {
    /// Load from the file named by `CAR_PRICE_CONFIG` (or the default file) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path, environment())
    }

    /// Load from an explicit file (may be absent) and environment source
    pub fn load_from(path: &str, env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

/// Environment source for `CAR_PRICE__SECTION__KEY` variables
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("artifacts.search_dirs")
}
