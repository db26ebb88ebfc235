//! Manavault API clients
//!
//! Typed clients for the two HTTP collaborators:
//!
//! - [`ScryfallClient`]: free-text card search and card lookup on the card
//!   provider
//! - [`BackendClient`]: account, collection and deck operations on the
//!   Manavault backend, authenticated with an explicit [`Session`]
//!
//! Both share one `HttpClientTrait` and report failures as [`ApiError`].

pub mod backend;
pub mod error;
pub mod response;
pub mod scryfall;
pub mod types;

pub use backend::{BackendClient, DEFAULT_BACKEND_URL};
pub use error::{ApiError, Result};
pub use scryfall::{ScryfallClient, DEFAULT_SCRYFALL_URL};
pub use types::{CreatedDeck, MessageResponse, TokenResponse, UserProfile};

pub use manavault_http::Session;
