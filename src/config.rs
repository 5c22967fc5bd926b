use crate::enrich::Style;
use crate::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_proposer")]
    pub default_proposer: String,
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_logo_path")]
    pub logo_path: Option<PathBuf>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_template_name_chars")]
    pub template_name_chars: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub default_style: Style,
}

fn default_proposer() -> String {
    "行銷部".to_string()
}

fn default_filename_prefix() -> String {
    "MoneyMKT".to_string()
}

fn default_font_family() -> String {
    "Microsoft JhengHei".to_string()
}

fn default_logo_path() -> Option<PathBuf> {
    Some(PathBuf::from("logo.png"))
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_template_name_chars() -> usize {
    8
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_proposer: default_proposer(),
            filename_prefix: default_filename_prefix(),
            font_family: default_font_family(),
            logo_path: default_logo_path(),
            output_dir: default_output_dir(),
            template_name_chars: default_template_name_chars(),
            log_level: default_log_level(),
            default_style: Style::default(),
        }
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir()
        .ok_or_else(|| PlannerError::Config("Failed to get config directory".to_string()))?;

    path.push("planner");
    fs::create_dir_all(&path)?;

    path.push("config.json");
    Ok(path)
}

pub fn load_config() -> Result<Config> {
    load_config_from(&get_config_path()?)
}

/// Loads the config at `path`, writing defaults when the file is missing.
///
/// Files written by older versions are backfilled with the keys they lack.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        let default_config = Config::default();
        save_config_to(path, &default_config)?;
        return Ok(default_config);
    }

    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| PlannerError::Config(format!("Failed to parse config: {}", e)))?;
    let mut config: Config = serde_json::from_value(value.clone())
        .map_err(|e| PlannerError::Config(format!("Failed to parse config: {}", e)))?;

    let mut changed = false;
    if config.template_name_chars == 0 {
        config.template_name_chars = default_template_name_chars();
        changed = true;
    }

    if needs_backfill(&value)? || changed {
        save_config_to(path, &config)?;
    }

    Ok(config)
}

/// True when `value` lacks any key a serialized `Config` carries
fn needs_backfill(value: &serde_json::Value) -> Result<bool> {
    let expected = serde_json::to_value(Config::default())
        .map_err(|e| PlannerError::Config(format!("Failed to serialize config: {}", e)))?;

    Ok(match (expected.as_object(), value.as_object()) {
        (Some(expected), Some(obj)) => expected.keys().any(|key| !obj.contains_key(key)),
        _ => false,
    })
}

pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| PlannerError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(path, content)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = load_config_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_is_backfilled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "filename_prefix": "Promo" }"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.filename_prefix, "Promo");
        assert_eq!(config.default_proposer, "行銷部");

        let rewritten = fs::read_to_string(&path).unwrap();
        assert!(rewritten.contains("default_proposer"));
        assert!(rewritten.contains("\"Promo\""));
    }

    #[test]
    fn test_every_missing_key_is_backfilled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "default_proposer": "a", "filename_prefix": "b", "font_family": "c", "template_name_chars": 8 }"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.log_level, "info");

        let rewritten: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        for key in ["log_level", "output_dir", "logo_path", "default_style"] {
            assert!(rewritten.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(rewritten["default_proposer"], "a");
    }

    #[test]
    fn test_complete_file_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut value = serde_json::to_value(Config::default()).unwrap();
        value["log_level"] = "debug".into();
        let content = serde_json::to_string(&value).unwrap();
        fs::write(&path, &content).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_zero_name_chars_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "template_name_chars": 0 }"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.template_name_chars, 8);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            load_config_from(&path),
            Err(PlannerError::Config(_))
        ));
    }
}
