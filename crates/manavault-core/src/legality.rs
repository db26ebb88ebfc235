//! Format legality grouping for card details

use std::collections::BTreeMap;

use serde::Serialize;

const LEGAL: &str = "legal";
const NOT_LEGAL: &str = "not_legal";
const BANNED: &str = "banned";

/// Format names of one card, grouped by legality status and sorted.
///
/// Statuses other than `legal`, `not_legal` and `banned` are not shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LegalityGroups {
    pub legal: Vec<String>,
    pub not_legal: Vec<String>,
    pub banned: Vec<String>,
}

impl LegalityGroups {
    /// Group a `format -> status` map
    pub fn from_map(legalities: &BTreeMap<String, String>) -> Self {
        let formats_with = |status: &str| -> Vec<String> {
            let mut formats: Vec<String> = legalities
                .iter()
                .filter(|(_, value)| value.as_str() == status)
                .map(|(format, _)| format.clone())
                .collect();
            formats.sort();
            formats
        };

        Self {
            legal: formats_with(LEGAL),
            not_legal: formats_with(NOT_LEGAL),
            banned: formats_with(BANNED),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.legal.is_empty() && self.not_legal.is_empty() && self.banned.is_empty()
    }
}
