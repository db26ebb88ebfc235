//! Card and deck records exchanged with the card provider and the backend

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::item::{Item, PriceField, PriceRef};
use crate::legality::LegalityGroups;

/// Image links of a provider card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageUris {
    #[serde(default)]
    pub normal: String,
}

/// Provider price strings (USD)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScryfallPrices {
    #[serde(default)]
    pub usd: Option<String>,
    #[serde(default)]
    pub usd_foil: Option<String>,
}

/// A card as returned by the card-search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScryfallCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub prices: Option<ScryfallPrices>,
    #[serde(default)]
    pub legalities: BTreeMap<String, String>,
}

impl ScryfallCard {
    /// USD price string, if the provider has one
    pub fn usd_price(&self) -> Option<&str> {
        self.prices.as_ref().and_then(|prices| prices.usd.as_deref())
    }

    /// Normal-size image link, or an empty string
    pub fn image_url(&self) -> &str {
        self.image_uris
            .as_ref()
            .map(|uris| uris.normal.as_str())
            .unwrap_or_default()
    }

    pub fn legality_groups(&self) -> LegalityGroups {
        LegalityGroups::from_map(&self.legalities)
    }
}

impl Item for ScryfallCard {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn price(&self) -> Option<PriceRef<'_>> {
        self.usd_price().map(PriceRef::Text)
    }
}

/// A card saved in a user's collection or deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionCard {
    pub scryfall_id: String,
    pub name: String,
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub price: Option<PriceField>,
}

impl CollectionCard {
    /// Build the record saved to the backend from a provider card.
    ///
    /// The price is the parsed USD price, or 0 when missing or unparseable.
    pub fn from_scryfall(card: &ScryfallCard) -> Self {
        let price = card
            .usd_price()
            .and_then(|usd| usd.trim().parse::<f64>().ok())
            .filter(|price| price.is_finite())
            .unwrap_or(0.0);

        Self {
            scryfall_id: card.id.clone(),
            name: card.name.clone(),
            set_name: card.set_name.clone(),
            image_url: card.image_url().to_string(),
            price: Some(PriceField::Number(price)),
        }
    }
}

impl Item for CollectionCard {
    fn item_id(&self) -> &str {
        &self.scryfall_id
    }

    fn price(&self) -> Option<PriceRef<'_>> {
        self.price.as_ref().map(PriceField::as_price_ref)
    }
}

/// A named deck of cards.
///
/// Listing endpoints may omit `cards`; identifiers may arrive either as a
/// plain string or as an `{"$oid": "..."}` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "deserialize_object_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<CollectionCard>,
}

impl Deck {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            cards: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ObjectId {
    Plain(String),
    Extended {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

fn deserialize_object_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<ObjectId>::deserialize(deserializer)?;
    Ok(id.map(|id| match id {
        ObjectId::Plain(id) => id,
        ObjectId::Extended { oid } => oid,
    }))
}
