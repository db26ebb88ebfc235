//! Priced, identifiable records

use std::str::FromStr;

use rust_decimal::{prelude::FromPrimitive, Decimal};
use serde::{Deserialize, Serialize};

/// A single record that can be paginated and valued.
///
/// Identifiers are unique within one result set. Prices are exposed raw;
/// interpretation (and tolerance of bad data) belongs to [`PriceRef::to_decimal`].
pub trait Item {
    /// Identifier of this item within its result set
    fn item_id(&self) -> &str;

    /// Raw price, if the record carries one
    fn price(&self) -> Option<PriceRef<'_>>;
}

impl<T: Item + ?Sized> Item for &T {
    fn item_id(&self) -> &str {
        (**self).item_id()
    }

    fn price(&self) -> Option<PriceRef<'_>> {
        (**self).price()
    }
}

/// Borrowed view of a raw price value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceRef<'a> {
    /// Price as text, e.g. `"3.50"` from the card provider
    Text(&'a str),
    /// Price as a number, as stored by the backend
    Number(f64),
}

impl PriceRef<'_> {
    /// Convert to a decimal amount.
    ///
    /// Returns `None` for text that does not parse, for negative amounts and
    /// for non-finite numbers.
    pub fn to_decimal(&self) -> Option<Decimal> {
        let value = match self {
            PriceRef::Text(text) => Decimal::from_str(text.trim()).ok()?,
            PriceRef::Number(number) if number.is_finite() => Decimal::from_f64(*number)?,
            PriceRef::Number(_) => return None,
        };

        if value.is_sign_negative() && !value.is_zero() {
            return None;
        }
        Some(value)
    }
}

/// Owned price as it appears in JSON payloads (number or string)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Number(f64),
    Text(String),
}

impl PriceField {
    /// Borrow as a [`PriceRef`]
    pub fn as_price_ref(&self) -> PriceRef<'_> {
        match self {
            PriceField::Number(number) => PriceRef::Number(*number),
            PriceField::Text(text) => PriceRef::Text(text),
        }
    }
}

impl From<f64> for PriceField {
    fn from(value: f64) -> Self {
        PriceField::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_price_parses() {
        assert_eq!(
            PriceRef::Text("3.50").to_decimal(),
            Some(Decimal::new(350, 2))
        );
        assert_eq!(
            PriceRef::Text(" 10.00 ").to_decimal(),
            Some(Decimal::new(1000, 2))
        );
    }

    #[test]
    fn test_malformed_text_price_is_none() {
        assert_eq!(PriceRef::Text("not-a-number").to_decimal(), None);
        assert_eq!(PriceRef::Text("").to_decimal(), None);
    }

    #[test]
    fn test_negative_price_is_none() {
        assert_eq!(PriceRef::Text("-1.00").to_decimal(), None);
        assert_eq!(PriceRef::Number(-0.5).to_decimal(), None);
    }

    #[test]
    fn test_number_price() {
        assert_eq!(PriceRef::Number(2.5).to_decimal(), Some(Decimal::new(25, 1)));
        assert_eq!(PriceRef::Number(0.0).to_decimal(), Some(Decimal::ZERO));
        assert_eq!(PriceRef::Number(f64::NAN).to_decimal(), None);
        assert_eq!(PriceRef::Number(f64::INFINITY).to_decimal(), None);
    }

    #[test]
    fn test_price_field_deserializes_number_or_text() {
        let number: PriceField = serde_json::from_str("4.25").unwrap();
        assert_eq!(number, PriceField::Number(4.25));

        let text: PriceField = serde_json::from_str("\"4.25\"").unwrap();
        assert_eq!(text, PriceField::Text("4.25".to_string()));
    }
}
