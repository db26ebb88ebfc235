//! Manavault core domain
//!
//! Pure, I/O-free building blocks shared by every Manavault front end:
//!
//! - **Card models**: search results from the card provider and cards saved
//!   in a user's collection or decks
//! - **Pagination**: `PaginatedResultSet` slices an already-fetched result list
//!   into fixed-size pages with clamped navigation
//! - **Aggregation**: `ValueAggregator` reduces priced items into a count and
//!   a USD total, treating missing or malformed prices as zero
//! - **Legalities**: grouping of a card's format legality map by status
//!
//! Network collaborators live in `manavault-api`; they hand fully materialized
//! result lists to these types.

pub mod aggregate;
pub mod error;
pub mod item;
pub mod legality;
pub mod models;
pub mod pagination;

pub use aggregate::{AggregateTotals, ValueAggregator};
pub use error::{CoreError, Result};
pub use item::{Item, PriceField, PriceRef};
pub use legality::LegalityGroups;
pub use models::{CollectionCard, Deck, ImageUris, ScryfallCard, ScryfallPrices};
pub use pagination::{PageInfo, PaginatedResultSet, DEFAULT_PAGE_SIZE};
