//! Card search with client-side pages

use manavault_core::{PaginatedResultSet, ScryfallCard};
use tracing::debug;

use super::{format_price, Command};
use crate::context::AppContext;
use crate::error::CliResult;
use crate::output::OutputStyle;

/// Search the card provider and print one page of results
pub struct SearchCommand {
    query: Option<String>,
    page: i64,
}

impl SearchCommand {
    pub fn new(query: Option<String>, page: i64) -> Self {
        Self { query, page }
    }

    /// The query to send, falling back to the configured default
    fn effective_query<'a>(&'a self, default: &'a str) -> &'a str {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .unwrap_or(default)
    }
}

#[async_trait::async_trait]
impl Command for SearchCommand {
    async fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let query = self.effective_query(&ctx.config.search.default_query);
        let cards = ctx.scryfall.search(query).await?;

        let mut results = PaginatedResultSet::with_items(ctx.config.search.page_size, cards)?;
        let page = results.go_to(self.page);
        if i64::try_from(page).ok() != Some(self.page) {
            debug!("Requested page {} clamped to {}", self.page, page);
        }

        println!("{}", render_results(&results, query, &OutputStyle::default()));
        Ok(())
    }
}

/// Current page of `results` with a "Page x of y" footer
pub fn render_results(
    results: &PaginatedResultSet<ScryfallCard>,
    query: &str,
    style: &OutputStyle,
) -> String {
    if results.is_empty() {
        return style.info(&format!("No cards found for \"{}\"", query));
    }

    let info = results.page_summary();
    let offset = (info.page - 1) * info.page_size;

    let mut lines = vec![style.header(&format!("Results for \"{}\"", query))];
    for (i, card) in results.current_page().iter().enumerate() {
        lines.push(style.numbered_item(
            offset + i + 1,
            &format!(
                "{} | {} | {}  {}",
                card.name,
                card.set_name,
                format_price(card),
                style.id(&card.id)
            ),
        ));
    }
    lines.push(style.page_footer(&info));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(n: usize) -> ScryfallCard {
        serde_json::from_value(serde_json::json!({
            "id": format!("id-{n}"),
            "name": format!("Card {n}"),
            "set_name": "Alpha",
            "prices": { "usd": if n % 2 == 0 { Some("1.00") } else { None } }
        }))
        .unwrap()
    }

    #[test]
    fn test_effective_query() {
        assert_eq!(SearchCommand::new(None, 1).effective_query("black lotus"), "black lotus");
        assert_eq!(
            SearchCommand::new(Some("  ".to_string()), 1).effective_query("black lotus"),
            "black lotus"
        );
        assert_eq!(
            SearchCommand::new(Some(" bolt ".to_string()), 1).effective_query("black lotus"),
            "bolt"
        );
    }

    #[test]
    fn test_render_last_page() {
        let mut results =
            PaginatedResultSet::with_items(20, (0..45).map(card).collect()).unwrap();
        results.go_to(3);

        let rendered = render_results(&results, "card", &OutputStyle::plain());
        assert!(rendered.starts_with("Results for \"card\""));
        assert!(rendered.contains("  41. Card 40 | Alpha | $1.00 USD  id-40"));
        assert!(rendered.contains("  45. Card 44 | Alpha | $1.00 USD  id-44"));
        assert!(!rendered.contains("Card 39 "));
        assert!(rendered.ends_with("Page 3 of 3 (45 cards)"));
    }

    #[test]
    fn test_render_missing_price() {
        let results = PaginatedResultSet::with_items(20, vec![card(1)]).unwrap();
        let rendered = render_results(&results, "card", &OutputStyle::plain());
        assert!(rendered.contains("Card 1 | Alpha | n/a  id-1"));
    }

    #[test]
    fn test_render_no_results() {
        let results = PaginatedResultSet::<ScryfallCard>::new(20).unwrap();
        assert_eq!(
            render_results(&results, "zzz", &OutputStyle::plain()),
            "ℹ No cards found for \"zzz\""
        );
    }
}
