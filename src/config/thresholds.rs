use serde::{Deserialize, Serialize};

use crate::core::Provenance;

/// Minimum search volume per provenance, applied after deduplication.
///
/// Verified data keeps a low bar so real signal survives; estimates are the
/// least trustworthy and most numerous, so they need the most volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteringConfig {
    #[serde(default = "default_verified_min_volume")]
    pub verified_min_volume: u64,

    #[serde(default = "default_brand_min_volume")]
    pub brand_min_volume: u64,

    #[serde(default = "default_untagged_min_volume")]
    pub untagged_min_volume: u64,

    #[serde(default = "default_estimated_min_volume")]
    pub estimated_min_volume: u64,
}

impl Default for FilteringConfig {
    fn default() -> Self {
        Self {
            verified_min_volume: default_verified_min_volume(),
            brand_min_volume: default_brand_min_volume(),
            untagged_min_volume: default_untagged_min_volume(),
            estimated_min_volume: default_estimated_min_volume(),
        }
    }
}

impl FilteringConfig {
    pub fn min_volume_for(&self, provenance: Provenance) -> u64 {
        match provenance {
            Provenance::Verified => self.verified_min_volume,
            Provenance::Brand => self.brand_min_volume,
            Provenance::Untagged => self.untagged_min_volume,
            Provenance::Estimated => self.estimated_min_volume,
        }
    }

    /// Same thresholds for every provenance.
    pub fn uniform(min_volume: u64) -> Self {
        Self {
            verified_min_volume: min_volume,
            brand_min_volume: min_volume,
            untagged_min_volume: min_volume,
            estimated_min_volume: min_volume,
        }
    }
}

fn default_verified_min_volume() -> u64 {
    100
}
fn default_brand_min_volume() -> u64 {
    100
}
fn default_untagged_min_volume() -> u64 {
    500
}
fn default_estimated_min_volume() -> u64 {
    1000
}

/// Defaults for fields collectors leave out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_cpc_low")]
    pub default_cpc_low: f64,

    #[serde(default = "default_cpc_high")]
    pub default_cpc_high: f64,

    /// Estimate missing search volume from the term instead of using zero
    #[serde(default = "default_estimate_missing_volume")]
    pub estimate_missing_volume: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            default_cpc_low: default_cpc_low(),
            default_cpc_high: default_cpc_high(),
            estimate_missing_volume: default_estimate_missing_volume(),
        }
    }
}

impl InputConfig {
    pub fn violations(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (name, value) in [
            ("default_cpc_low", self.default_cpc_low),
            ("default_cpc_high", self.default_cpc_high),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(format!("input.{} must be non-negative, got {}", name, value));
            }
        }
        if errors.is_empty() && self.default_cpc_low > self.default_cpc_high {
            errors.push(format!(
                "input.default_cpc_low ({}) must not exceed input.default_cpc_high ({})",
                self.default_cpc_low, self.default_cpc_high
            ));
        }
        errors
    }
}

fn default_cpc_low() -> f64 {
    0.5
}
fn default_cpc_high() -> f64 {
    2.0
}
fn default_estimate_missing_volume() -> bool {
    true
}

/// Rule thresholds for intent classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Terms with at least this many words are long-tail
    #[serde(default = "default_long_tail_min_words")]
    pub long_tail_min_words: usize,

    /// Low-competition terms below this volume are long-tail
    #[serde(default = "default_long_tail_max_volume")]
    pub long_tail_max_volume: u64,

    /// Unmatched terms above this volume fall into core category, others into product
    #[serde(default = "default_fallback_core_min_volume")]
    pub fallback_core_min_volume: u64,

    #[serde(default = "default_max_ad_groups")]
    pub max_ad_groups: usize,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            long_tail_min_words: default_long_tail_min_words(),
            long_tail_max_volume: default_long_tail_max_volume(),
            fallback_core_min_volume: default_fallback_core_min_volume(),
            max_ad_groups: default_max_ad_groups(),
        }
    }
}

impl ClassificationConfig {
    pub fn violations(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.long_tail_min_words == 0 {
            errors.push("classification.long_tail_min_words must be at least 1".to_string());
        }
        if self.max_ad_groups == 0 {
            errors.push("classification.max_ad_groups must be at least 1".to_string());
        }
        errors
    }
}

fn default_long_tail_min_words() -> usize {
    4
}
fn default_long_tail_max_volume() -> u64 {
    1000
}
fn default_fallback_core_min_volume() -> u64 {
    2000
}
fn default_max_ad_groups() -> usize {
    15
}
