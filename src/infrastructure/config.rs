use std::path::{Path, PathBuf};

use color_eyre::eyre::Result;
use config::ConfigError;
use serde::Deserialize;

use crate::{presentation::config::keybindings::KeyBindings, utils};

const CONFIG: &str = include_str!("../../.config/config.json5");

const CONFIG_FILES: [(&str, config::FileFormat); 5] = [
    ("config.json5", config::FileFormat::Json5),
    ("config.json", config::FileFormat::Json),
    ("config.yaml", config::FileFormat::Yaml),
    ("config.toml", config::FileFormat::Toml),
    ("config.ini", config::FileFormat::Ini),
];

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

/// The `api` section: where and how users are fetched
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_version: String,
    pub seed: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://randomuser.me/".to_string(),
            api_version: "1.3".to_string(),
            seed: "lydia".to_string(),
            timeout_secs: 15,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PagingConfig {
    pub results_per_page: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            results_per_page: 20,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Relative paths are resolved against the data directory
    pub database_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            database_file: PathBuf::from("users.sqlite3"),
        }
    }
}

impl StorageConfig {
    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        if self.database_file.is_absolute() {
            self.database_file.clone()
        } else {
            data_dir.join(&self.database_file)
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
}

impl Config {
    /// Load the embedded defaults layered under any user file in the config
    /// directory
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_from(&utils::get_config_dir(), &utils::get_data_dir())
    }

    pub fn load_from(config_dir: &Path, data_dir: &Path) -> Result<Self, ConfigError> {
        let default_config: Config = json5::from_str(CONFIG)
            .map_err(|e| ConfigError::Message(format!("Failed to load default config: {e}")))?;

        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.display().to_string())?
            .set_default("_config_dir", config_dir.display().to_string())?;

        let mut found_config = false;
        for (file, format) in &CONFIG_FILES {
            let path = config_dir.join(file);
            if path.exists() {
                found_config = true;
            }
            builder = builder.add_source(config::File::from(path).format(*format).required(false));
        }
        if !found_config {
            log::info!(
                "No configuration file found in {}, using defaults",
                config_dir.display()
            );
            return Ok(Self {
                config: AppConfig {
                    _data_dir: data_dir.to_path_buf(),
                    _config_dir: config_dir.to_path_buf(),
                },
                ..default_config
            });
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;

        // Sections the user file leaves out fall back to serde defaults,
        // which match the embedded file; bindings are merged key by key.
        cfg.keybindings.merge_defaults(&default_config.keybindings);

        if cfg.paging.results_per_page == 0 {
            return Err(ConfigError::Message(String::from(
                "paging.results_per_page must be greater than zero",
            )));
        }

        Ok(cfg)
    }

    pub fn data_dir(&self) -> &Path {
        &self.config._data_dir
    }
}
