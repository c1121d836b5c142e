use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Application configuration
/// Loaded from an optional JSON file; CLI flags and `LOCALE_DIR` override it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory containing messages.xlf and messages.<locale>.xlf
    #[serde(default = "default_locale_dir")]
    pub locale_dir: PathBuf,

    /// Angular workspace root, where angular.json and node_modules live
    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,

    /// Page size used when a listing does not specify one
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Largest number of updates accepted by one bulk update
    #[serde(default = "default_max_bulk_updates")]
    pub max_bulk_updates: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_locale_dir() -> PathBuf {
    PathBuf::from("src/locale")
}

fn default_working_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_page_size() -> usize {
    50
}

fn default_max_bulk_updates() -> usize {
    50
}

impl Config {
    /// Load configuration from a JSON file, or defaults when it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let file = File::open(path)
            .context(format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.locale_dir.as_os_str().is_empty() {
            return Err(anyhow!("Locale directory must not be empty"));
        }

        if self.default_page_size == 0 {
            return Err(anyhow!("Default page size must be greater than zero"));
        }

        if self.max_bulk_updates == 0 {
            return Err(anyhow!("Maximum bulk updates must be greater than zero"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            locale_dir: default_locale_dir(),
            working_dir: default_working_dir(),
            default_page_size: default_page_size(),
            max_bulk_updates: default_max_bulk_updates(),
            log_level: LogLevel::default(),
        }
    }
}
