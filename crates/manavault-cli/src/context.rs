//! Everything a command needs: configuration, session and API clients

use std::path::PathBuf;

use manavault_api::{BackendClient, ScryfallClient, Session};
use manavault_config::{AppConfig, ConfigManager, ConfigManagerTrait};
use manavault_http::shared_client;
use tracing::debug;

use crate::error::CliResult;
use crate::session_store::{SessionStore, TOKEN_ENV};

/// Application state shared by the command handlers
pub struct AppContext {
    pub config: AppConfig,
    pub sessions: SessionStore,
    pub scryfall: ScryfallClient,
    pub backend: BackendClient,
}

impl AppContext {
    /// Read and validate the configuration from `config_path` or the default
    /// location
    pub fn load_config(config_path: Option<PathBuf>) -> CliResult<AppConfig> {
        let mut manager = match config_path {
            Some(path) => ConfigManager::with_path(path),
            None => ConfigManager::new(),
        };
        Ok(manager.load_config()?)
    }

    /// Load the stored session and build the clients for `config`
    pub fn with_config(config: AppConfig) -> CliResult<Self> {
        let sessions = SessionStore::default();
        let session = sessions.load(std::env::var(TOKEN_ENV).ok().as_deref())?;

        Self::from_parts(config, sessions, session)
    }

    /// Build a context from already-loaded parts
    pub fn from_parts(
        config: AppConfig,
        sessions: SessionStore,
        session: Session,
    ) -> CliResult<Self> {
        let http = shared_client(config.http.to_http_config())?;

        let scryfall = ScryfallClient::new(http.clone(), &config.api.scryfall_url)?
            .with_max_pages(config.search.max_provider_pages);
        let backend = BackendClient::new(http, &config.api.backend_url, session)?;

        debug!(
            "Context ready (backend {}, logged in: {})",
            backend.base_url(),
            backend.session().is_authenticated()
        );

        Ok(Self {
            config,
            sessions,
            scryfall,
            backend,
        })
    }

    pub fn session(&self) -> &Session {
        self.backend.session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::resolve_level;
    use tempfile::TempDir;

    #[test]
    fn test_config_level_is_available_before_clients() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

        let config = AppContext::load_config(Some(path)).unwrap();
        assert_eq!(resolve_level(false, false, &config.logging.level), tracing::Level::WARN);
        assert_eq!(resolve_level(true, false, &config.logging.level), tracing::Level::DEBUG);
    }

    #[test]
    fn test_invalid_config_stops_before_clients() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbackend_url = \"not a url\"\n").unwrap();

        assert!(matches!(
            AppContext::load_config(Some(path)),
            Err(crate::error::CliError::Config(_))
        ));
    }

    #[test]
    fn test_from_parts_uses_given_session() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        let ctx = AppContext::from_parts(
            AppConfig::default(),
            store,
            Session::authenticated("tok"),
        )
        .unwrap();
        assert_eq!(ctx.session().token(), Some("tok"));
        assert_eq!(ctx.backend.base_url().as_str(), "http://localhost:8000/");
    }
}
