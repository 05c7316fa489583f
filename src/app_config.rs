use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::pipeline::CaptionConfig;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Caption layout and timing
    #[serde(default)]
    pub captions: CaptionConfig,

    /// Output file naming
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Naming of generated subtitle files
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Appended to the input file stem
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Extension of the generated file, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            extension: default_extension(),
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

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_suffix() -> String {
    "_subtitles".to_string()
}

fn default_extension() -> String {
    "srt".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.captions.validate()?;

        if self.output.extension.trim().is_empty() {
            return Err(anyhow!("Output extension cannot be empty"));
        }
        if self.output.extension.starts_with('.') {
            return Err(anyhow!(
                "Output extension should not start with a dot: {}",
                self.output.extension
            ));
        }
        if self.output.suffix.contains(['/', '\\']) {
            return Err(anyhow!(
                "Output suffix cannot contain path separators: {}",
                self.output.suffix
            ));
        }

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .map_err(AppError::from)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration, writing a default file first if none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        FileManager::write_atomic(path.as_ref(), &config_json)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            captions: CaptionConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
