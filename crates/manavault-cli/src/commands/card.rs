//! Card detail view

use manavault_core::{CollectionCard, ScryfallCard};

use super::{format_price, Command};
use crate::context::AppContext;
use crate::error::CliResult;
use crate::output::{print_success, OutputStyle};

/// Show one card, optionally saving it to the collection
pub struct CardCommand {
    id: String,
    add: bool,
}

impl CardCommand {
    pub fn new(id: String) -> Self {
        Self { id, add: false }
    }

    /// Also add the card to the user's collection
    pub fn with_add(mut self, add: bool) -> Self {
        self.add = add;
        self
    }
}

#[async_trait::async_trait]
impl Command for CardCommand {
    async fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let card = ctx.scryfall.card(&self.id).await?;
        println!("{}", render_card(&card, &OutputStyle::default()));

        if self.add {
            let saved = ctx
                .backend
                .add_to_collection(&CollectionCard::from_scryfall(&card))
                .await?;
            print_success(&or_default(saved.message, "Card added to collection"));
        }
        Ok(())
    }
}

pub(crate) fn or_default(message: String, default: &str) -> String {
    if message.trim().is_empty() {
        default.to_string()
    } else {
        message
    }
}

pub fn render_card(card: &ScryfallCard, style: &OutputStyle) -> String {
    let mut lines = vec![
        style.header(&card.name),
        style.key_value("Set", &card.set_name),
        style.key_value("Price", &format_price(card)),
        style.key_value("Id", &style.id(&card.id)),
    ];
    if !card.image_url().is_empty() {
        lines.push(style.key_value("Image", card.image_url()));
    }

    if let Some(text) = card.oracle_text.as_deref().filter(|text| !text.is_empty()) {
        lines.push(style.section("Oracle text"));
        lines.push(text.to_string());
    }

    lines.push(style.section("Legalities"));
    let groups = card.legality_groups();
    if groups.is_empty() {
        lines.push(style.list_item("No legality data"));
    }
    for (label, formats) in [
        ("Legal", &groups.legal),
        ("Not legal", &groups.not_legal),
        ("Banned", &groups.banned),
    ] {
        if !formats.is_empty() {
            lines.push(style.key_value(label, &formats.join(", ")));
        }
    }

    lines.join("\n")
}
