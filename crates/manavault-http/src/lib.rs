//! Centralized HTTP client for Manavault
//!
//! Every collaborator (card provider, collection backend) talks HTTP through
//! this crate, so transport failures surface as one error type.
//!
//! ## Features
//!
//! - **Trait-based design**: Mockable via `HttpClientTrait`
//! - **Configurable**: Timeouts, retries, proxy, user-agent
//! - **Middleware support**: Retry logic with exponential backoff
//! - **Explicit sessions**: Bearer credentials travel in a `Session` value
//!   handed to whoever needs them, never through global state

pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod session;

pub use client::{shared_client, HttpClient, HttpClientTrait};
pub use config::{parse_proxy, HttpConfig};
pub use error::{HttpError, Result};
pub use middleware::{RetryConfig, RetryMiddleware};
pub use session::Session;

/// Re-export commonly used types
pub use reqwest::{header, Body, Method, Response, StatusCode};
