// Command handlers for the manavault CLI

pub mod auth;
pub mod card;
pub mod collection;
pub mod decks;
pub mod search;

pub use auth::{AuthAction, AuthCommand};
pub use card::CardCommand;
pub use collection::{CollectionAction, CollectionCommand};
pub use decks::{DecksAction, DecksCommand};
pub use search::SearchCommand;

use manavault_core::{Item, ValueAggregator};

use crate::context::AppContext;
use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self, ctx: &AppContext) -> CliResult<()>;
}

/// Price of one item as `$X.XX USD`, or `n/a` when it has none
pub(crate) fn format_price<T: Item>(item: &T) -> String {
    match item.price() {
        Some(_) => ValueAggregator::aggregate(std::slice::from_ref(item)).display_total(),
        None => "n/a".to_string(),
    }
}
