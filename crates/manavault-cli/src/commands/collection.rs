//! Collection listing and editing

use manavault_core::{CollectionCard, ValueAggregator};

use super::card::or_default;
use super::{format_price, Command};
use crate::context::AppContext;
use crate::error::CliResult;
use crate::output::{print_success, OutputStyle};

/// Collection command action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionAction {
    List,
    /// Look the card up on the provider and save it
    Add { scryfall_id: String },
    Remove { scryfall_id: String },
}

/// Collection command handler
pub struct CollectionCommand {
    action: CollectionAction,
}

impl CollectionCommand {
    pub fn new(action: CollectionAction) -> Self {
        Self { action }
    }
}

#[async_trait::async_trait]
impl Command for CollectionCommand {
    async fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        match &self.action {
            CollectionAction::List => {
                let cards = ctx.backend.collection().await?;
                println!("{}", render_collection(&cards, &OutputStyle::default()));
            }
            CollectionAction::Add { scryfall_id } => {
                let card = ctx.scryfall.card(scryfall_id).await?;
                let response = ctx
                    .backend
                    .add_to_collection(&CollectionCard::from_scryfall(&card))
                    .await?;
                print_success(&or_default(
                    response.message,
                    &format!("Added {} to your collection", card.name),
                ));
            }
            CollectionAction::Remove { scryfall_id } => {
                let response = ctx.backend.remove_from_collection(scryfall_id).await?;
                print_success(&or_default(response.message, "Card removed from collection"));
            }
        }
        Ok(())
    }
}

/// Card list followed by count and value totals
pub fn render_cards(cards: &[CollectionCard], style: &OutputStyle) -> Vec<String> {
    let mut lines: Vec<String> = cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            style.numbered_item(
                i + 1,
                &format!(
                    "{} ({}) | {}  {}",
                    card.name,
                    card.set_name,
                    format_price(card),
                    style.id(&card.scryfall_id)
                ),
            )
        })
        .collect();
    if cards.is_empty() {
        lines.push(style.list_item("No cards yet"));
    }
    lines.push(String::new());
    lines.push(style.totals(&ValueAggregator::aggregate(cards)));
    lines
}

pub fn render_collection(cards: &[CollectionCard], style: &OutputStyle) -> String {
    let mut lines = vec![style.section("My Collection")];
    lines.extend(render_cards(cards, style));
    lines.join("\n")
}
