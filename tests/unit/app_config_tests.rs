/*!
 * Unit tests for application configuration
 */

use anyhow::Result;
use signbridge::app_config::{Config, LogLevel};

use crate::common;

#[test]
fn test_defaultConfig_shouldValidate() -> Result<()> {
    let config = Config::default();
    config.validate()?;

    assert!(config.vision.is_demo_mode());
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.frames_dir.is_none());
    Ok(())
}

#[test]
fn test_writeAndLoad_shouldPreserveSettings() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.bind_address = "0.0.0.0:9000".to_string();
    config.vision.api_key = "secret".to_string();
    config.vision.timeout_secs = 5;
    config.write_to_file(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.bind_address, "0.0.0.0:9000");
    assert_eq!(loaded.vision.timeout_secs, 5);
    assert!(!loaded.vision.is_demo_mode());
    Ok(())
}

#[test]
fn test_load_withEmptyObject_shouldUseAllDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");
    std::fs::write(&path, "{}")?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.bind_address, "127.0.0.1:8080");
    assert_eq!(loaded.vision.model, "gemini-1.5-flash");
    assert!(loaded.vision.is_demo_mode());
    Ok(())
}

#[test]
fn test_load_withInvalidBindAddress_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");
    std::fs::write(&path, r#"{"bind_address": "nope"}"#)?;

    assert!(Config::from_file(&path).is_err());
    Ok(())
}
