//! Core configuration types and data structures

use std::time::Duration;

use manavault_core::DEFAULT_PAGE_SIZE;
use manavault_http::HttpConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Collaborator endpoints
    pub api: ApiConfig,
    /// Card search behaviour
    pub search: SearchConfig,
    /// HTTP client settings
    pub http: HttpSettings,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Endpoints of the backend and the card provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the collection backend
    pub backend_url: String,
    /// Base URL of the card-search provider
    pub scryfall_url: String,
}

/// Card search configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Cards shown per page
    pub page_size: usize,
    /// Query used when none is given
    pub default_query: String,
    /// Provider result pages fetched per search
    pub max_provider_pages: usize,
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Retries for idempotent requests
    pub retry_count: u32,
    /// Optional HTTP/HTTPS proxy
    pub proxy: Option<String>,
    /// Overrides the default `Manavault/<version>` user agent
    pub user_agent: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level: trace, debug, info, warn or error
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            scryfall_url: "https://api.scryfall.com".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            default_query: "black lotus".to_string(),
            max_provider_pages: 1,
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            retry_count: 2,
            proxy: None,
            user_agent: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl HttpSettings {
    /// Build the HTTP client configuration
    pub fn to_http_config(&self) -> HttpConfig {
        let config = HttpConfig::new()
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .with_retry_count(self.retry_count);

        let config = match &self.proxy {
            Some(proxy) => config.with_proxy(proxy.clone()),
            None => config,
        };
        match &self.user_agent {
            Some(agent) => config.with_user_agent(agent.clone()),
            None => config,
        }
    }
}

/// Configuration manager trait
pub trait ConfigManager {
    /// Load configuration
    fn load_config(&mut self) -> Result<AppConfig, crate::error::ConfigError>;
    /// Save configuration
    fn save_config(&self, config: &AppConfig) -> Result<(), crate::error::ConfigError>;
    /// Validate configuration
    fn validate_config(&self, config: &AppConfig) -> Result<(), crate::error::ConfigError>;
}
