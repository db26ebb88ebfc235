//! Manavault configuration management
//!
//! Loads `AppConfig` from an optional TOML file layered under `MANAVAULT__*`
//! environment variables, validates it, and writes it back.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{
    ApiConfig, AppConfig, ConfigManager as ConfigManagerTrait, HttpSettings, LoggingConfig,
    SearchConfig,
};
