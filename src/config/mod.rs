//! User settings: YAML file in the platform home directory, with
//! defaults applied when the file or a field is absent.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_time_format")]
    pub time_format: String,
    /// Overrides `date_format` + `time_format` when non-empty.
    #[serde(default)]
    pub datetime_format: String,
    /// Display unit for durations: "min" (default) or "h".
    #[serde(default = "default_duration_unit")]
    pub duration_unit: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

fn default_date_format() -> String {
    "%m-%d-%Y".to_string()
}

fn default_time_format() -> String {
    "%H:%M".to_string()
}

fn default_duration_unit() -> String {
    "min".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            date_format: default_date_format(),
            time_format: default_time_format(),
            datetime_format: String::new(),
            duration_unit: default_duration_unit(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".worklog")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("worklog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("worklog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("failed to read {}: {e}", path.display())))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Ensure the parent directory of the database path exists.
    pub fn ensure_database_dir(&self) -> AppResult<()> {
        if let Some(parent) = PathBuf::from(&self.database).parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}
