//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::{AppConfig, ConfigManager as ConfigManagerTrait},
};

const ENV_PREFIX: &str = "MANAVAULT";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration manager
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self {
            config_path: Self::config_dir().join("config.toml"),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Create with custom config path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use a different environment prefix (variables look like `PREFIX__SECTION__KEY`)
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Directory holding Manavault's config and session files
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("manavault")
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

impl ConfigManagerTrait for ConfigManager {
    fn load_config(&mut self) -> Result<AppConfig> {
        debug!("Loading configuration from {}", self.config_path.display());

        let builder = Config::builder()
            .add_source(
                File::from(self.config_path.clone())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;
        self.validate_config(&app_config)?;
        Ok(app_config)
    }

    fn save_config(&self, config: &AppConfig) -> Result<()> {
        self.validate_config(config)?;
        let toml = toml::to_string_pretty(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;
        Ok(())
    }

    fn validate_config(&self, config: &AppConfig) -> Result<()> {
        if config.search.page_size == 0 {
            return Err(ConfigError::Validation(
                "Page size must be greater than 0".to_string(),
            ));
        }
        if config.search.max_provider_pages == 0 {
            return Err(ConfigError::Validation(
                "Provider page limit must be greater than 0".to_string(),
            ));
        }
        for (name, value) in [
            ("backend_url", &config.api.backend_url),
            ("scryfall_url", &config.api.scryfall_url),
        ] {
            url::Url::parse(value).map_err(|e| {
                ConfigError::Validation(format!("Invalid {name} {value:?}: {e}"))
            })?;
        }
        if let Some(proxy) = &config.http.proxy {
            manavault_http::parse_proxy(proxy)
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
        }
        if !LOG_LEVELS.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "Unknown log level {:?}",
                config.logging.level
            )));
        }
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
