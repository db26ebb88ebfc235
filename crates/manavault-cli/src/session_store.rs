//! Persistence of the login token between invocations

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use manavault_api::{Session, TokenResponse};
use manavault_config::ConfigManager;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Environment variable that overrides the stored token
pub const TOKEN_ENV: &str = "MANAVAULT_TOKEN";

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    access_token: String,
    #[serde(default)]
    token_type: String,
}

/// Reads and writes `session.json` next to the config file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<config dir>/manavault/session.json`
    pub fn default_path() -> PathBuf {
        ConfigManager::config_dir().join("session.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Session for this run. A non-blank `override_token` wins over the file;
    /// no file means an anonymous session.
    pub fn load(&self, override_token: Option<&str>) -> CliResult<Session> {
        if let Some(token) = override_token.filter(|token| !token.trim().is_empty()) {
            debug!("Using token from {}", TOKEN_ENV);
            return Ok(Session::authenticated(token));
        }

        if !self.path.exists() {
            return Ok(Session::anonymous());
        }

        let content = fs::read_to_string(&self.path)?;
        let stored: StoredSession = serde_json::from_str(&content).map_err(|e| {
            CliError::Session(format!("{} is corrupt: {}", self.path.display(), e))
        })?;
        Ok(Session::authenticated(stored.access_token))
    }

    /// Remember a freshly issued token
    pub fn save(&self, token: &TokenResponse) -> CliResult<()> {
        let stored = StoredSession {
            access_token: token.access_token.clone(),
            token_type: token.token_type.clone(),
        };
        let content = serde_json::to_string_pretty(&stored)
            .map_err(|e| CliError::Session(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_private(&self.path, content.as_bytes())?;
        debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    /// Forget the stored token. Returns whether one was present.
    pub fn clear(&self) -> CliResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        Ok(true)
    }
}

/// Write `content` to `path`, readable by the owner only on unix
fn write_private(path: &Path, content: &[u8]) -> CliResult<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    // mode() only applies when the file is created
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(content)?;
    Ok(())
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn token(value: &str) -> TokenResponse {
        TokenResponse {
            access_token: value.to_string(),
            token_type: "bearer".to_string(),
        }
    }

    #[test]
    fn test_missing_file_is_anonymous() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert!(!store.load(None).unwrap().is_authenticated());
    }

    #[test]
    fn test_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));

        store.save(&token("abc123")).unwrap();
        assert_eq!(store.load(None).unwrap().token(), Some("abc123"));

        assert!(store.clear().unwrap());
        assert!(!store.load(None).unwrap().is_authenticated());
        assert!(!store.clear().unwrap());
    }

    #[test]
    fn test_override_wins() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store.save(&token("stored")).unwrap();

        assert_eq!(store.load(Some("from-env")).unwrap().token(), Some("from-env"));
        assert_eq!(store.load(Some("  ")).unwrap().token(), Some("stored"));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = SessionStore::new(path);
        assert!(matches!(store.load(None), Err(CliError::Session(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        SessionStore::new(path.clone()).save(&token("secret")).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
