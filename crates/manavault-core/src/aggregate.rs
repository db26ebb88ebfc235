//! Count and value totals over priced items

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::warn;

use crate::item::Item;

/// Count and summed USD value of a set of items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AggregateTotals {
    pub count: usize,
    pub total_value: Decimal,
}

impl AggregateTotals {
    /// Totals of an empty collection
    pub const EMPTY: AggregateTotals = AggregateTotals {
        count: 0,
        total_value: Decimal::ZERO,
    };

    /// Total rounded to cents, half away from zero
    pub fn rounded_total(&self) -> Decimal {
        self.total_value
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Total formatted for display, e.g. `$13.50 USD`
    pub fn display_total(&self) -> String {
        format!("${:.2} USD", self.rounded_total())
    }
}

impl Default for AggregateTotals {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for AggregateTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cards, {}", self.count, self.display_total())
    }
}

/// Reduces a collection of priced items into [`AggregateTotals`]
pub struct ValueAggregator;

impl ValueAggregator {
    /// Count the items and sum their prices.
    ///
    /// Missing prices count as zero. Prices that are present but unusable
    /// (malformed, negative, non-finite) also count as zero and are logged.
    /// A sum beyond the decimal range stays at `Decimal::MAX`.
    pub fn aggregate<T: Item>(items: &[T]) -> AggregateTotals {
        let mut total_value = Decimal::ZERO;
        let mut saturated = false;

        for item in items {
            let price = match item.price() {
                None => continue,
                Some(raw) => match raw.to_decimal() {
                    Some(price) => price,
                    None => {
                        warn!(item = item.item_id(), "Ignoring unusable price {:?}", raw);
                        continue;
                    }
                },
            };

            total_value = total_value.checked_add(price).unwrap_or_else(|| {
                saturated = true;
                Decimal::MAX
            });
        }

        if saturated {
            warn!("Total value overflowed; capped at {}", Decimal::MAX);
        }

        AggregateTotals {
            count: items.len(),
            total_value,
        }
    }
}
