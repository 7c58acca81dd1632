/*!
 * Application configuration module
 *
 * This module handles the application configuration including loading,
 * validating and saving configuration settings.
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Address and port the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// SQLite database file path; None uses the platform data directory
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Directory for stored frame snapshots; None disables snapshots
    #[serde(default)]
    pub frames_dir: Option<PathBuf>,

    /// Vision provider config
    #[serde(default)]
    pub vision: VisionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Vision provider configuration
///
/// An empty API key selects demo mode at analyzer construction time;
/// it is never a startup failure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VisionConfig {
    /// API key for the Gemini Vision API
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Model name (e.g. "gemini-1.5-flash")
    #[serde(default = "default_vision_model")]
    pub model: String,

    /// Service endpoint URL (optional, for proxies or self-hosted gateways)
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl VisionConfig {
    /// Whether the analyzer should run against canned demo responses
    pub fn is_demo_mode(&self) -> bool {
        self.api_key.is_empty()
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_vision_model(),
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_vision_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = std::io::BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Write the configuration to a JSON file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.bind_address
            .parse::<std::net::SocketAddr>()
            .with_context(|| format!("Invalid bind address: {}", self.bind_address))?;

        if self.vision.model.is_empty() {
            return Err(anyhow::anyhow!("Vision model name must not be empty"));
        }

        if self.vision.timeout_secs == 0 {
            return Err(anyhow::anyhow!("Vision timeout must be at least 1 second"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            bind_address: default_bind_address(),
            database_path: None,
            frames_dir: None,
            vision: VisionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
