//! Card provider client

use std::sync::Arc;

use manavault_core::ScryfallCard;
use manavault_http::{header::HeaderMap, HttpClientTrait, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::{
    error::{ApiError, Result},
    response::read_json,
    types::ScryfallList,
};

/// Public card provider endpoint
pub const DEFAULT_SCRYFALL_URL: &str = "https://api.scryfall.com";

/// Client for card search and lookup.
///
/// Search returns every printing, ordered by release date.
pub struct ScryfallClient {
    http: Arc<dyn HttpClientTrait>,
    base_url: Url,
    max_pages: usize,
}

impl ScryfallClient {
    pub fn new(http: Arc<dyn HttpClientTrait>, base_url: &str) -> Result<Self> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            max_pages: 1,
        })
    }

    /// Follow up to `max_pages` provider pages per search (at least one)
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Search cards with the provider's free-text query syntax.
    ///
    /// A query that matches nothing yields an empty list.
    pub async fn search(&self, query: &str) -> Result<Vec<ScryfallCard>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::InvalidInput("search query is empty".to_string()));
        }

        let mut url = endpoint(&self.base_url, &["cards", "search"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("unique", "prints")
            .append_pair("order", "released");

        let mut cards = Vec::new();
        let mut next = Some(url.to_string());
        let mut pages = 0;

        while let Some(page_url) = next.take() {
            let page: ScryfallList<ScryfallCard> =
                match self.http.get(&page_url, HeaderMap::new()).await {
                    Ok(response) => read_json(response).await?,
                    Err(e) if e.status() == Some(StatusCode::NOT_FOUND) && pages == 0 => {
                        debug!("No cards matched {:?}", query);
                        return Ok(Vec::new());
                    }
                    Err(e) => return Err(e.into()),
                };

            pages += 1;
            cards.extend(page.data);

            if page.has_more {
                if pages < self.max_pages {
                    next = page.next_page;
                } else {
                    warn!(
                        "Search {:?} has more results; stopped after {} page(s)",
                        query, pages
                    );
                }
            }
        }

        debug!("Search {:?} returned {} cards", query, cards.len());
        Ok(cards)
    }

    /// Fetch a single card by provider id
    pub async fn card(&self, id: &str) -> Result<ScryfallCard> {
        let url = endpoint(&self.base_url, &["cards", id])?;
        let response = self.http.get(url.as_str(), HeaderMap::new()).await?;
        read_json(response).await
    }
}

/// Append percent-encoded path segments to `base`
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl(format!("{base} cannot be a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
