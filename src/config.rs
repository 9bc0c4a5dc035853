//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub scan: ScanConfig,
    pub logging: LoggingConfig,
}

/// External API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub osv: OsvConfig,
}

/// OSV API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsvConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Scan behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Upper bound on in-flight vulnerability queries
    pub max_concurrent_queries: usize,
    /// Manifest scanned for Android projects unless overridden on the CLI
    pub gradle_manifest: PathBuf,
    /// Manifest scanned for Flutter projects unless overridden on the CLI
    pub pubspec_manifest: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                osv: OsvConfig {
                    base_url: "https://api.osv.dev".to_string(),
                    timeout_seconds: 30,
                },
            },
            scan: ScanConfig {
                max_concurrent_queries: 8,
                gradle_manifest: PathBuf::from("app/build.gradle"),
                pubspec_manifest: PathBuf::from("pubspec.yaml"),
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
                format: "compact".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = Config::default();

        config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("DEPSCAN").separator("__"))
            .build()?
            .try_deserialize()
    }
}
