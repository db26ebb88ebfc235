//! Deck management

use manavault_core::{CollectionCard, Deck, ValueAggregator};

use super::card::or_default;
use super::collection::render_cards;
use super::Command;
use crate::context::AppContext;
use crate::error::CliResult;
use crate::output::{print_success, OutputStyle};

/// Decks command action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecksAction {
    List,
    Create { name: String },
    Show { deck_id: String },
    Rename { deck_id: String, name: String },
    Delete { deck_id: String },
    AddCard { deck_id: String, scryfall_id: String },
    RemoveCard { deck_id: String, scryfall_id: String },
}

/// Decks command handler
pub struct DecksCommand {
    action: DecksAction,
}

impl DecksCommand {
    pub fn new(action: DecksAction) -> Self {
        Self { action }
    }
}

#[async_trait::async_trait]
impl Command for DecksCommand {
    async fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let style = OutputStyle::default();
        match &self.action {
            DecksAction::List => {
                let decks = ctx.backend.decks().await?;
                println!("{}", render_deck_list(&decks, &style));
            }
            DecksAction::Create { name } => {
                let created = ctx.backend.create_deck(name).await?;
                let mut message = or_default(created.message, "Deck created");
                if let Some(id) = created.id {
                    message.push_str(&format!(" (id {})", style.id(&id)));
                }
                print_success(&message);
            }
            DecksAction::Show { deck_id } => {
                let deck = ctx.backend.deck(deck_id).await?;
                println!("{}", render_deck(&deck, &style));
            }
            DecksAction::Rename { deck_id, name } => {
                let response = ctx.backend.rename_deck(deck_id, name).await?;
                print_success(&or_default(response.message, "Deck renamed"));
            }
            DecksAction::Delete { deck_id } => {
                let response = ctx.backend.delete_deck(deck_id).await?;
                print_success(&or_default(response.message, "Deck deleted"));
            }
            DecksAction::AddCard {
                deck_id,
                scryfall_id,
            } => {
                let card = ctx.scryfall.card(scryfall_id).await?;
                let response = ctx
                    .backend
                    .add_card_to_deck(deck_id, &CollectionCard::from_scryfall(&card))
                    .await?;
                print_success(&or_default(
                    response.message,
                    &format!("Added {} to the deck", card.name),
                ));
            }
            DecksAction::RemoveCard {
                deck_id,
                scryfall_id,
            } => {
                let response = ctx
                    .backend
                    .remove_card_from_deck(deck_id, scryfall_id)
                    .await?;
                print_success(&or_default(response.message, "Card removed from deck"));
            }
        }
        Ok(())
    }
}

fn deck_id(deck: &Deck) -> &str {
    deck.id.as_deref().unwrap_or("no id")
}

/// One line per deck with its size and value
pub fn render_deck_list(decks: &[Deck], style: &OutputStyle) -> String {
    let mut lines = vec![style.section("My Decks")];
    if decks.is_empty() {
        lines.push(style.list_item("No decks yet. Create one with 'manavault decks create <name>'"));
    }
    for (i, deck) in decks.iter().enumerate() {
        lines.push(style.numbered_item(
            i + 1,
            &format!(
                "{}  {}  {}",
                deck.name,
                style.id(deck_id(deck)),
                ValueAggregator::aggregate(&deck.cards)
            ),
        ));
    }
    lines.join("\n")
}

pub fn render_deck(deck: &Deck, style: &OutputStyle) -> String {
    let mut lines = vec![
        style.section(&deck.name),
        style.key_value("Id", &style.id(deck_id(deck))),
        String::new(),
    ];
    lines.extend(render_cards(&deck.cards, style));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burn() -> Deck {
        serde_json::from_value(serde_json::json!({
            "_id": { "$oid": "d1" },
            "name": "Burn",
            "cards": [
                { "scryfall_id": "a", "name": "Lightning Bolt", "set_name": "M10", "image_url": "", "price": 1.25 },
                { "scryfall_id": "b", "name": "Lava Spike", "set_name": "CHK", "image_url": "", "price": "0.75" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_render_deck_list() {
        let decks = vec![burn(), Deck::new("Empty")];
        let rendered = render_deck_list(&decks, &OutputStyle::plain());
        assert!(rendered.contains("  1. Burn  d1  2 cards, $2.00 USD"));
        assert!(rendered.contains("  2. Empty  no id  0 cards, $0.00 USD"));
    }

    #[test]
    fn test_render_empty_deck_list() {
        let rendered = render_deck_list(&[], &OutputStyle::plain());
        assert!(rendered.contains("No decks yet"));
    }

    #[test]
    fn test_render_deck() {
        let rendered = render_deck(&burn(), &OutputStyle::plain());
        assert!(rendered.contains("  Id: d1"));
        assert!(rendered.contains("  2. Lava Spike (CHK) | $0.75 USD  b"));
        assert!(rendered.ends_with("Total cards: 2\nTotal value: $2.00 USD"));
    }
}
