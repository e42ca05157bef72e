//! Configuration handling for the `todo` binary
//!
//! Configuration is read from `.todo.toml` (project, nearest ancestor of
//! the current directory) and `~/.config/todolist/config.toml` (global).
//! Missing files and missing keys fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::OutputFormat;
use crate::domain::{TodoCategory, DEFAULT_COLOR, DEFAULT_UPCOMING_DAYS};

/// File name looked up when searching for project configuration
pub const PROJECT_CONFIG_FILE: &str = ".todo.toml";

/// Largest upcoming-deadline window, in days; `stats` builds one bucket per day
pub const MAX_UPCOMING_DAYS: i64 = 3650;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Window used by `stats` when `--days` is not given
    pub upcoming_days: i64,

    /// Color for `category add` when `--color` is not given
    pub default_color: String,

    /// strftime pattern for dates in text output
    pub date_format: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            default_color: DEFAULT_COLOR.to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl ProjectConfig {
    /// Rejects values the engine would refuse later anyway
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_UPCOMING_DAYS).contains(&self.upcoming_days) {
            return Err(ConfigError::Invalid(format!(
                "upcoming_days must be between 0 and {}, got {}",
                MAX_UPCOMING_DAYS, self.upcoming_days
            )));
        }
        if !TodoCategory::validate_color(&self.default_color) {
            return Err(ConfigError::Invalid(format!(
                "default_color must look like #RGB or #RRGGBB, got '{}'",
                self.default_color
            )));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Invalid(format!(
                "date_format is not a valid strftime pattern: '{}'",
                self.date_format
            )));
        }
        Ok(())
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Output format when `--format` is not given
    pub default_format: OutputFormat,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_file: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    ///
    /// `project_file` replaces the `.todo.toml` lookup; unlike the lookup,
    /// an explicit file must exist.
    pub fn load(project_file: Option<&Path>) -> Result<Self> {
        let global = Self::load_global()?;

        let project_file = match project_file {
            Some(path) => {
                if !path.is_file() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => std::env::current_dir()
                .ok()
                .and_then(|dir| Self::find_project_file(&dir)),
        };

        let project = match &project_file {
            Some(path) => Self::load_project_config(path)?,
            None => ProjectConfig::default(),
        };

        Ok(Self {
            project,
            global,
            project_file,
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "todolist", "todolist")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads and validates a project configuration file
    pub fn load_project_config(path: &Path) -> Result<ProjectConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read project config: {}", path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        config
            .validate()
            .with_context(|| format!("Rejected project config: {}", path.display()))?;
        Ok(config)
    }

    /// Finds the nearest `.todo.toml`, starting at `start` and walking up
    pub fn find_project_file(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.project.upcoming_days, 7);
        assert_eq!(config.project.default_color, "#808080");
        assert_eq!(config.project.date_format, "%Y-%m-%d");
        assert_eq!(config.global.default_format, OutputFormat::Text);
        assert!(config.project.validate().is_ok());
    }

    #[test]
    fn parse_project_config() {
        let toml = r##"
upcoming_days = 14
default_color = "#3366FF"
"##;

        let config: ProjectConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.upcoming_days, 14);
        assert_eq!(config.default_color, "#3366FF");
        assert_eq!(config.date_format, "%Y-%m-%d");
    }

    #[test]
    fn parse_global_config() {
        let toml = r#"
default_format = "json"
"#;

        let config: GlobalConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let negative = ProjectConfig {
            upcoming_days: -3,
            ..ProjectConfig::default()
        };
        assert!(matches!(negative.validate(), Err(ConfigError::Invalid(_))));

        let too_wide = ProjectConfig {
            upcoming_days: MAX_UPCOMING_DAYS + 1,
            ..ProjectConfig::default()
        };
        assert!(matches!(too_wide.validate(), Err(ConfigError::Invalid(_))));

        let widest = ProjectConfig {
            upcoming_days: MAX_UPCOMING_DAYS,
            ..ProjectConfig::default()
        };
        assert!(widest.validate().is_ok());

        let bad_color = ProjectConfig {
            default_color: "blue".to_string(),
            ..ProjectConfig::default()
        };
        assert!(bad_color.validate().is_err());

        let bad_format = ProjectConfig {
            date_format: "%Q".to_string(),
            ..ProjectConfig::default()
        };
        assert!(bad_format.validate().is_err());
    }

    #[test]
    fn find_project_file_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "upcoming_days = 3\n").unwrap();

        let sub_dir = dir.path().join("sub").join("dir");
        fs::create_dir_all(&sub_dir).unwrap();

        let found = Config::find_project_file(&sub_dir).unwrap();
        assert_eq!(found, dir.path().join(PROJECT_CONFIG_FILE));

        let config = Config::load_project_config(&found).unwrap();
        assert_eq!(config.upcoming_days, 3);
    }

    #[test]
    fn load_rejects_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "upcoming_days = \"many\"\n").unwrap();

        let err = Config::load_project_config(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse project config"));
    }
}
