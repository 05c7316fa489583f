/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use txt2srt::app_config::{Config, LogLevel, OutputConfig};
use txt2srt::errors::AppError;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.captions.group_size, 2);
    assert_eq!(config.captions.words_per_minute, 150.0);
    assert_eq!(config.captions.min_caption_seconds, 1.0);
    assert_eq!(config.output.suffix, "_subtitles");
    assert_eq!(config.output.extension, "srt");
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.captions.group_size = 0;
    assert!(config.validate().is_err());
    config.captions.group_size = 3;
    assert!(config.validate().is_ok());

    config.captions.words_per_minute = -5.0;
    assert!(config.validate().is_err());
    config.captions.words_per_minute = 200.0;

    config.output.extension = ".srt".to_string();
    assert!(config.validate().is_err());
    config.output.extension = String::new();
    assert!(config.validate().is_err());
    config.output.extension = "srt".to_string();

    config.output.suffix = "../escape".to_string();
    assert!(config.validate().is_err());
}

/// Partial JSON falls back to defaults for missing fields
#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let json = r#"{ "captions": { "group_size": 1 }, "log_level": "debug" }"#;
    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.captions.group_size, 1);
    assert_eq!(config.captions.words_per_minute, 150.0);
    assert_eq!(config.output, OutputConfig::default());
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);

    Ok(())
}

#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&config_path)?;

    assert_eq!(config, Config::default());
    assert!(config_path.exists());
    assert_eq!(Config::load(&config_path)?, Config::default());

    Ok(())
}

#[test]
fn test_save_and_load_withCustomValues_shouldPreserveThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = temp_dir.path().join("custom.json");

    let mut config = Config::default();
    config.captions.max_caption_seconds = Some(7.0);
    config.captions.split_on_newline = true;
    config.output.suffix = ".en".to_string();
    config.log_level = LogLevel::Warn;
    config.save(&config_path)?;

    assert_eq!(Config::load(&config_path)?, config);

    Ok(())
}

#[test]
fn test_load_withMalformedJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;

    let error = Config::load(&config_path).unwrap_err();
    assert!(format!("{:#}", error).contains("Failed to parse config file"));
    assert!(matches!(error.downcast_ref::<AppError>(), Some(AppError::Config(_))));

    Ok(())
}
