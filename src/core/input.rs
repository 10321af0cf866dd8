//! Collector input contract.
//!
//! Collectors hand over loosely typed records: only `term` is required and
//! every numeric field may be missing, null, a number, or a numeric string.
//! Unusable values fall back to configured defaults instead of failing the
//! batch. Missing search volume is estimated from the term itself with a
//! stable hash so that repeated runs see identical inputs.

use super::{Competition, KeywordRecord, Provenance};
use crate::config::InputConfig;
use serde::de::IgnoredAny;
use serde::Deserialize;
use xxhash_rust::xxh64::xxh64;

/// Words that mark a short term as a product query with higher demand.
const PRODUCT_WORDS: &[&str] = &["ai", "software", "platform", "tool"];

/// A numeric field as it may arrive from a scraper or spreadsheet export.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl NumericField {
    /// Interpret the field as a finite, non-negative number.
    pub fn as_non_negative(&self) -> Option<f64> {
        let value = match self {
            NumericField::Number(n) => *n,
            NumericField::Text(s) => s.trim().replace(',', "").parse::<f64>().ok()?,
            NumericField::Other(_) => return None,
        };
        (value.is_finite() && value >= 0.0).then_some(value)
    }
}

/// A text field that may arrive with the wrong JSON type.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    Text(String),
    Other(IgnoredAny),
}

impl TextField {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TextField::Text(s) => Some(s),
            TextField::Other(_) => None,
        }
    }
}

impl From<&str> for TextField {
    fn from(value: &str) -> Self {
        TextField::Text(value.to_string())
    }
}

/// Raw keyword record in the collector wire shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawKeyword {
    #[serde(default, alias = "keyword")]
    pub term: Option<TextField>,
    #[serde(default)]
    pub search_volume: Option<NumericField>,
    #[serde(default)]
    pub cpc_low: Option<NumericField>,
    #[serde(default)]
    pub cpc_high: Option<NumericField>,
    #[serde(default)]
    pub competition: Option<TextField>,
    #[serde(default, alias = "data_source")]
    pub provenance: Option<TextField>,
}

impl RawKeyword {
    /// Convenience constructor for a record that only carries a term.
    pub fn term_only(term: impl Into<String>) -> Self {
        Self {
            term: Some(TextField::Text(term.into())),
            ..Self::default()
        }
    }
}

/// Turns raw collector records into [`KeywordRecord`]s.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    config: InputConfig,
}

impl RecordBuilder {
    pub fn new(config: InputConfig) -> Self {
        Self { config }
    }

    /// Build one record. Returns `None` when there is no usable term.
    pub fn build(&self, raw: &RawKeyword) -> Option<KeywordRecord> {
        let term = raw
            .term
            .as_ref()
            .and_then(TextField::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())?;

        let parsed_volume = raw
            .search_volume
            .as_ref()
            .and_then(NumericField::as_non_negative);
        let tagged = raw
            .provenance
            .as_ref()
            .and_then(TextField::as_str)
            .map(Provenance::parse_lenient);

        let (search_volume, provenance) = match parsed_volume {
            Some(volume) => (volume as u64, tagged.unwrap_or(Provenance::Untagged)),
            None if self.config.estimate_missing_volume => (
                estimate_search_volume(term),
                tagged.unwrap_or(Provenance::Estimated),
            ),
            None => (0, tagged.unwrap_or(Provenance::Untagged)),
        };

        let cpc_low = raw
            .cpc_low
            .as_ref()
            .and_then(NumericField::as_non_negative)
            .unwrap_or(self.config.default_cpc_low);
        let cpc_high = raw
            .cpc_high
            .as_ref()
            .and_then(NumericField::as_non_negative)
            .unwrap_or(self.config.default_cpc_high);
        let competition = raw
            .competition
            .as_ref()
            .and_then(TextField::as_str)
            .map(Competition::parse_lenient)
            .unwrap_or_default();

        Some(KeywordRecord::new(
            term,
            search_volume,
            cpc_low,
            cpc_high,
            competition,
            provenance,
        ))
    }

    /// Build every usable record, silently skipping the rest.
    pub fn build_all(&self, raws: &[RawKeyword]) -> Vec<KeywordRecord> {
        raws.iter().filter_map(|raw| self.build(raw)).collect()
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

/// Deterministic monthly volume estimate for a term without measured data.
///
/// The range depends on term length and product vocabulary; the position
/// inside the range comes from an xxh64 hash of the normalized term.
pub fn estimate_search_volume(term: &str) -> u64 {
    let normalized = term
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>();
    let has_product_word = normalized
        .iter()
        .any(|word| PRODUCT_WORDS.contains(&word.as_str()));

    let (low, high) = match normalized.len() {
        0..=2 if has_product_word => (2000, 8000),
        0..=2 => (1000, 5000),
        3 => (500, 3000),
        _ => (200, 1500),
    };

    let hash = xxh64(normalized.join(" ").as_bytes(), 0);
    low + hash % (high - low)
}
