//! Layered configuration loaded with figment.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. `taskmanager.toml` in the working directory
//! 3. `taskmanager.local.toml` in the working directory
//! 4. Environment variables (`TASKMANAGER_*`, `__` separates nested sections)
//! 5. An explicit `--config <path>` file
//!
//! `TASKMANAGER_AI__API_KEY` maps to `ai.api_key`.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_PREFIX: &str = "TASKMANAGER_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("Config file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub database_path: PathBuf,
    /// Length in days of the completed-task window.
    pub previous_days_for_report: u32,
    pub log_file_path: PathBuf,
    pub reports_dir: PathBuf,
    pub suggestions_dir: PathBuf,
    #[serde(default)]
    pub ai: AiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_completion_tokens: u32,
    pub top_p: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            previous_days_for_report: 3,
            log_file_path: PathBuf::from("taskmanager.log"),
            reports_dir: PathBuf::from("."),
            suggestions_dir: PathBuf::from("."),
            ai: AiConfig::default(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            model: "openai/gpt-oss-120b".to_string(),
            temperature: 1.0,
            max_completion_tokens: 8192,
            top_p: 1.0,
        }
    }
}

impl AiConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl AppConfig {
    /// Load from defaults, the working-directory TOML files, and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(None)
    }

    /// Same as [`AppConfig::load`], with `extra` merged on top of everything.
    pub fn load_with(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Self::figment();

        if let Some(path) = extra {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        for file in ["taskmanager.toml", "taskmanager.local.toml"] {
            let path = PathBuf::from(file);
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.previous_days_for_report == 0 {
            return Err(ConfigError::InvalidValue {
                field: "previous_days_for_report".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database_path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn default_database_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "daily-tracker")
        .map(|dirs| dirs.data_dir().join("taskmanager.db"))
        .unwrap_or_else(|| PathBuf::from("taskmanager.db"))
}
