//! HTTP client implementation

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Body, Method, Response};
use tracing::debug;

use crate::{
    config::{parse_proxy, HttpConfig},
    error::{HttpError, Result},
    middleware::{RetryConfig, RetryMiddleware},
};

/// Mockable HTTP client trait
#[async_trait]
pub trait HttpClientTrait: Send + Sync {
    /// Execute a GET request
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<Response> {
        self.request(Method::GET, url, headers, None).await
    }

    /// Execute a POST request
    async fn post(&self, url: &str, headers: HeaderMap, body: Body) -> Result<Response> {
        self.request(Method::POST, url, headers, Some(body)).await
    }

    /// Execute a PUT request
    async fn put(&self, url: &str, headers: HeaderMap, body: Body) -> Result<Response> {
        self.request(Method::PUT, url, headers, Some(body)).await
    }

    /// Execute a PATCH request
    async fn patch(&self, url: &str, headers: HeaderMap, body: Body) -> Result<Response> {
        self.request(Method::PATCH, url, headers, Some(body)).await
    }

    /// Execute a DELETE request
    async fn delete(&self, url: &str, headers: HeaderMap) -> Result<Response> {
        self.request(Method::DELETE, url, headers, None).await
    }

    /// Execute a custom HTTP request.
    ///
    /// Non-2xx answers are returned as [`HttpError::HttpStatus`] carrying the
    /// response body as message.
    async fn request(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<Body>,
    ) -> Result<Response>;
}

/// Production HTTP client
pub struct HttpClient {
    inner: reqwest::Client,
    config: HttpConfig,
    retry: RetryMiddleware,
}

impl HttpClient {
    /// Create a new HTTP client with configuration
    pub fn new(config: HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(parse_proxy(proxy_url)?)
                .map_err(|e| HttpError::InvalidProxy(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let inner = builder
            .build()
            .map_err(|e| HttpError::BuildError(e.to_string()))?;

        let retry_config = RetryConfig {
            max_attempts: config.retry_count,
            initial_delay: config.retry_delay,
            ..Default::default()
        };

        Ok(Self {
            inner,
            config,
            retry: RetryMiddleware::new(retry_config),
        })
    }

    /// Create HTTP client with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpConfig::default())
    }

    /// Get configuration
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    async fn send_once(
        &self,
        method: Method,
        url: url::Url,
        headers: HeaderMap,
        body: Option<Body>,
    ) -> Result<Response> {
        let mut request = self.inner.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout(self.config.timeout)
            } else {
                HttpError::RequestFailed(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::HttpStatus {
                status,
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn request(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<Body>,
    ) -> Result<Response> {
        let url = url
            .parse::<url::Url>()
            .map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
        debug!("HTTP {}: {}", method, url);

        // reqwest::Body is not Clone, so only bodiless GETs go through retries
        if method == Method::GET && body.is_none() {
            return self
                .retry
                .execute(move || self.send_once(Method::GET, url.clone(), headers.clone(), None))
                .await;
        }

        self.send_once(method, url, headers, body).await
    }
}

/// Create a shared HTTP client (Arc-wrapped for cloning)
pub fn shared_client(config: HttpConfig) -> Result<Arc<dyn HttpClientTrait>> {
    Ok(Arc::new(HttpClient::new(config)?))
}
