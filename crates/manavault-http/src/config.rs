//! Settings of the shared HTTP client

use std::time::Duration;

use url::Url;

use crate::error::{HttpError, Result};

const PROXY_SCHEMES: [&str; 4] = ["http", "https", "socks5", "socks5h"];

/// Timeouts, retries and identity of the shared client.
///
/// Built from the `[http]` section of the application config; tests use
/// [`HttpConfig::fast`] so failures surface without waiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Retries after the first attempt, GETs only
    pub retry_count: u32,
    /// Delay before the first retry; doubles afterwards
    pub retry_delay: Duration,
    pub proxy: Option<String>,
    /// The card provider rejects requests without one
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retry_count: 2,
            retry_delay: Duration::from_millis(500),
            proxy: None,
            user_agent: format!("Manavault/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Short timeouts and no retries
    pub fn fast() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            retry_count: 0,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_retry_count(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Parse a proxy address. It must be an absolute `http`, `https` or `socks5`
/// URL with a host; bare host names are rejected.
pub fn parse_proxy(proxy: &str) -> Result<Url> {
    let url = Url::parse(proxy.trim())
        .map_err(|e| HttpError::InvalidProxy(format!("{proxy:?}: {e}")))?;

    if !PROXY_SCHEMES.contains(&url.scheme()) {
        return Err(HttpError::InvalidProxy(format!(
            "{proxy:?}: unsupported scheme {:?}",
            url.scheme()
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(HttpError::InvalidProxy(format!("{proxy:?}: missing host")));
    }
    Ok(url)
}
