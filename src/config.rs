use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database file. Falls back to the platform data directory.
    pub path: Option<PathBuf>,
    pub foreign_keys: bool,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            foreign_keys: true,
            busy_timeout_ms: 5000,
        }
    }
}

impl DatabaseConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_db_path)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default tracing filter when neither `-v` nor `JOBBANK_LOG` is given.
    pub log: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log: "warn".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::figment(explicit)
            .extract()
            .context("Failed to load configuration")
    }

    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        match explicit {
            Some(path) => figment = figment.merge(Toml::file(path)),
            None => {
                if let Some(path) = global_config_path() {
                    if path.exists() {
                        figment = figment.merge(Toml::file(path));
                    }
                }
            }
        }

        figment.merge(Env::prefixed("JOBBANK_").split("__"))
    }
}

fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "jobbank").map(|dirs| dirs.config_dir().join("config.toml"))
}

fn default_db_path() -> PathBuf {
    // XDG data directory, or the working directory as a last resort
    match directories::ProjectDirs::from("", "", "jobbank") {
        Some(dirs) => dirs.data_dir().join("jobbank.db"),
        None => PathBuf::from("jobbank.db"),
    }
}
