//! Collection backend client

use std::sync::Arc;

use manavault_core::{CollectionCard, Deck};
use manavault_http::{header::HeaderMap, HttpClientTrait, Method, Session};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::{
    error::{ApiError, Result},
    response::{form_body, json_body, read_json, with_form_content, with_json_content},
    scryfall::endpoint,
    types::{
        CreatedDeck, Credentials, ForgotPasswordRequest, MessageResponse, ResetPasswordRequest,
        TokenResponse, UserProfile,
    },
};

/// Backend address used when nothing is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Client for account, collection and deck operations.
///
/// Authenticated operations use the [`Session`] given at construction and fail
/// with [`ApiError::NotAuthenticated`] before any request when it is anonymous.
pub struct BackendClient {
    http: Arc<dyn HttpClientTrait>,
    base_url: Url,
    session: Session,
}

impl BackendClient {
    pub fn new(http: Arc<dyn HttpClientTrait>, base_url: &str, session: Session) -> Result<Self> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Replace the session, e.g. after login or logout
    pub fn set_session(&mut self, session: Session) {
        self.session = session;
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // --- Accounts ---

    pub async fn register(&self, email: &str, password: &str) -> Result<MessageResponse> {
        let email = required("email", email)?;
        let password = secret("password", password)?;
        let body = json_body(&Credentials { email, password })?;
        let url = endpoint(&self.base_url, &["auth", "register"])?;

        let response = self
            .http
            .post(url.as_str(), with_json_content(HeaderMap::new()), body)
            .await?;
        read_json(response).await
    }

    /// Exchange credentials for a bearer token.
    ///
    /// The session of this client is left untouched; the caller decides where
    /// the new session lives.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let email = required("email", email)?;
        let password = secret("password", password)?;
        let url = endpoint(&self.base_url, &["auth", "login"])?;
        let body = form_body(&[("username", email), ("password", password)]);

        let response = self
            .http
            .post(url.as_str(), with_form_content(HeaderMap::new()), body)
            .await?;
        let token: TokenResponse = read_json(response).await?;
        info!("Logged in as {}", email);
        Ok(token)
    }

    pub async fn me(&self) -> Result<UserProfile> {
        self.send(Method::GET, &["auth", "me"], None::<&()>).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse> {
        let email = required("email", email)?;
        let url = endpoint(&self.base_url, &["auth", "forgot-password"])?;
        let body = json_body(&ForgotPasswordRequest { email })?;

        let response = self
            .http
            .post(url.as_str(), with_json_content(HeaderMap::new()), body)
            .await?;
        read_json(response).await
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<MessageResponse> {
        let token = required("token", token)?;
        let new_password = secret("new password", new_password)?;
        let url = endpoint(&self.base_url, &["auth", "reset-password"])?;
        let body = json_body(&ResetPasswordRequest {
            token,
            new_password,
        })?;

        let response = self
            .http
            .post(url.as_str(), with_json_content(HeaderMap::new()), body)
            .await?;
        read_json(response).await
    }

    // --- Collection ---

    pub async fn collection(&self) -> Result<Vec<CollectionCard>> {
        self.send(Method::GET, &["users", "me", "collection"], None::<&()>)
            .await
    }

    pub async fn add_to_collection(&self, card: &CollectionCard) -> Result<MessageResponse> {
        self.send(Method::POST, &["users", "me", "collection"], Some(card))
            .await
    }

    pub async fn remove_from_collection(&self, scryfall_id: &str) -> Result<MessageResponse> {
        let scryfall_id = required("card id", scryfall_id)?;
        self.send(
            Method::DELETE,
            &["users", "me", "collection", scryfall_id],
            None::<&()>,
        )
        .await
    }

    // --- Decks ---

    pub async fn decks(&self) -> Result<Vec<Deck>> {
        self.send(Method::GET, &["users", "me", "decks"], None::<&()>)
            .await
    }

    pub async fn create_deck(&self, name: &str) -> Result<CreatedDeck> {
        let deck = Deck::new(required("deck name", name)?);
        self.send(Method::POST, &["users", "me", "decks"], Some(&deck))
            .await
    }

    pub async fn deck(&self, deck_id: &str) -> Result<Deck> {
        let deck_id = required("deck id", deck_id)?;
        self.send(Method::GET, &["users", "me", "decks", deck_id], None::<&()>)
            .await
    }

    /// Rename a deck. The backend expects the bare name as a JSON string.
    pub async fn rename_deck(&self, deck_id: &str, new_name: &str) -> Result<MessageResponse> {
        let deck_id = required("deck id", deck_id)?;
        let new_name = required("deck name", new_name)?;
        self.send(
            Method::PATCH,
            &["users", "me", "decks", deck_id],
            Some(new_name),
        )
        .await
    }

    pub async fn delete_deck(&self, deck_id: &str) -> Result<MessageResponse> {
        let deck_id = required("deck id", deck_id)?;
        self.send(
            Method::DELETE,
            &["users", "me", "decks", deck_id],
            None::<&()>,
        )
        .await
    }

    pub async fn add_card_to_deck(
        &self,
        deck_id: &str,
        card: &CollectionCard,
    ) -> Result<MessageResponse> {
        let deck_id = required("deck id", deck_id)?;
        self.send(
            Method::POST,
            &["users", "me", "decks", deck_id, "cards"],
            Some(card),
        )
        .await
    }

    pub async fn remove_card_from_deck(
        &self,
        deck_id: &str,
        scryfall_id: &str,
    ) -> Result<MessageResponse> {
        let deck_id = required("deck id", deck_id)?;
        let scryfall_id = required("card id", scryfall_id)?;
        self.send(
            Method::DELETE,
            &["users", "me", "decks", deck_id, "cards", scryfall_id],
            None::<&()>,
        )
        .await
    }

    /// Send an authenticated request and decode the JSON answer
    async fn send<B, T>(&self, method: Method, segments: &[&str], body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        if !self.session.is_authenticated() {
            return Err(ApiError::NotAuthenticated);
        }

        let url = endpoint(&self.base_url, segments)?;
        let headers = self.session.headers()?;
        debug!("Backend {} {}", method, url.path());

        let response = match body {
            Some(body) => {
                let body = json_body(body)?;
                self.http
                    .request(method, url.as_str(), with_json_content(headers), Some(body))
                    .await?
            }
            None => self.http.request(method, url.as_str(), headers, None).await?,
        };

        read_json(response).await
    }
}

/// Trim `value`, rejecting blank input
fn required<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}

/// Reject empty secrets without altering them
fn secret<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(ApiError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("name", "  Burn ").unwrap(), "Burn");
        assert!(matches!(
            required("name", "   "),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_secret_is_not_trimmed() {
        assert_eq!(secret("password", " pw ").unwrap(), " pw ");
        assert!(secret("password", "").is_err());
    }
}
