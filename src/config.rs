// src/config.rs
use crate::diagnostics::DEFAULT_CAPACITY;
use crate::error::Result;
use crate::projects::{EXPORT_FILE_NAME, PROJECT_STORAGE_KEY};
use crate::theme::THEME_STORAGE_KEY;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "academy-codelab.toml";
pub const ENV_PREFIX: &str = "CODELAB_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub storage_key: String,
    pub theme_key: String,
    pub export_file_name: String,
    pub database_file: String,
    pub resize_debounce_ms: u64,
    pub theme_resize_delay_ms: u64,
    pub diagnostic_capacity: usize,
    /// Overrides the default tracing filter (RUST_LOG still wins).
    pub log_filter: Option<String>,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        PlaygroundConfig {
            storage_key: PROJECT_STORAGE_KEY.to_string(),
            theme_key: THEME_STORAGE_KEY.to_string(),
            export_file_name: EXPORT_FILE_NAME.to_string(),
            database_file: "academy_codelab.db".to_string(),
            resize_debounce_ms: 120,
            theme_resize_delay_ms: 50,
            diagnostic_capacity: DEFAULT_CAPACITY,
            log_filter: None,
        }
    }
}

impl PlaygroundConfig {
    /// Defaults, then the TOML file (if it exists), then `CODELAB_*` variables.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(PlaygroundConfig::default()));
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        Ok(Self::figment(config_file).extract()?)
    }

    /// Looks for the config file next to the executable, like the database.
    pub fn default_file() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn theme_resize_delay(&self) -> Duration {
        Duration::from_millis(self.theme_resize_delay_ms)
    }
}
