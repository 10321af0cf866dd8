//! Scoring configuration for keyword relevance
//!
//! This module contains the relevance scoring knobs:
//! - Component weights (volume, competition, CPC efficiency, domain relevance)
//! - Domain bonus and penalty amounts
//! - Match-type heuristic thresholds

use serde::{Deserialize, Serialize};

/// Relevance component weights. Each component is capped at its weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for batch-relative search volume (0.0-1.0)
    #[serde(default = "default_volume_weight")]
    pub volume: f64,

    /// Weight for the competition lookup (0.0-1.0)
    #[serde(default = "default_competition_weight")]
    pub competition: f64,

    /// Weight for CPC efficiency relative to the batch maximum (0.0-1.0)
    #[serde(default = "default_cpc_efficiency_weight")]
    pub cpc_efficiency: f64,

    /// Cap on the domain bonus, applied symmetrically to penalties (0.0-1.0)
    #[serde(default = "default_domain_weight")]
    pub domain: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            volume: default_volume_weight(),
            competition: default_competition_weight(),
            cpc_efficiency: default_cpc_efficiency_weight(),
            domain: default_domain_weight(),
        }
    }
}

impl ScoringWeights {
    // Pure function: Check if a weight is in valid range
    pub fn is_valid_weight(weight: f64) -> bool {
        weight.is_finite() && (0.0..=1.0).contains(&weight)
    }

    // Pure function: Validate a single weight with name
    pub fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!(
                "scoring.{} weight must be between 0.0 and 1.0, got {}",
                name, weight
            ))
        }
    }

    pub fn sum(&self) -> f64 {
        self.volume + self.competition + self.cpc_efficiency + self.domain
    }

    /// Collect every weight violation instead of stopping at the first.
    pub fn violations(&self) -> Vec<String> {
        let mut errors: Vec<String> = [
            Self::validate_weight(self.volume, "volume"),
            Self::validate_weight(self.competition, "competition"),
            Self::validate_weight(self.cpc_efficiency, "cpc_efficiency"),
            Self::validate_weight(self.domain, "domain"),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        if errors.is_empty() && (self.sum() - 1.0).abs() > 0.001 {
            errors.push(format!(
                "scoring weights must sum to 1.0, but sum to {:.3}",
                self.sum()
            ));
        }
        errors
    }

    /// Validate that weights are in range and sum to 1.0 (with small tolerance)
    pub fn validate(&self) -> Result<(), String> {
        match self.violations().as_slice() {
            [] => Ok(()),
            errors => Err(errors.join("; ")),
        }
    }
}

pub fn default_volume_weight() -> f64 {
    0.30
}
pub fn default_competition_weight() -> f64 {
    0.20
}
pub fn default_cpc_efficiency_weight() -> f64 {
    0.20
}
pub fn default_domain_weight() -> f64 {
    0.30
}

/// Additive domain-relevance adjustments, summed then capped by `weights.domain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainBonuses {
    /// Term contains a core-category phrase
    #[serde(default = "default_core_phrase_bonus")]
    pub core_phrase: f64,

    /// Term contains a category term (only when no core phrase matched)
    #[serde(default = "default_category_term_bonus")]
    pub category_term: f64,

    /// Term contains a generic domain term (only when nothing above matched)
    #[serde(default = "default_generic_term_bonus")]
    pub generic_term: f64,

    #[serde(default = "default_brand_bonus")]
    pub brand: f64,

    #[serde(default = "default_commercial_bonus")]
    pub commercial: f64,

    /// Subtracted when the term contains filler words
    #[serde(default = "default_filler_penalty")]
    pub filler_penalty: f64,
}

impl Default for DomainBonuses {
    fn default() -> Self {
        Self {
            core_phrase: default_core_phrase_bonus(),
            category_term: default_category_term_bonus(),
            generic_term: default_generic_term_bonus(),
            brand: default_brand_bonus(),
            commercial: default_commercial_bonus(),
            filler_penalty: default_filler_penalty(),
        }
    }
}

impl DomainBonuses {
    pub fn violations(&self) -> Vec<String> {
        [
            ("core_phrase", self.core_phrase),
            ("category_term", self.category_term),
            ("generic_term", self.generic_term),
            ("brand", self.brand),
            ("commercial", self.commercial),
            ("filler_penalty", self.filler_penalty),
        ]
        .into_iter()
        .filter(|(_, value)| !(value.is_finite() && *value >= 0.0))
        .map(|(name, value)| {
            format!(
                "scoring.bonuses.{} must be a non-negative number, got {}",
                name, value
            )
        })
        .collect()
    }
}

fn default_core_phrase_bonus() -> f64 {
    0.25
}
fn default_category_term_bonus() -> f64 {
    0.20
}
fn default_generic_term_bonus() -> f64 {
    0.10
}
fn default_brand_bonus() -> f64 {
    0.20
}
fn default_commercial_bonus() -> f64 {
    0.15
}
fn default_filler_penalty() -> f64 {
    0.10
}

/// Relevance scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: ScoringWeights,

    #[serde(default)]
    pub bonuses: DomainBonuses,

    #[serde(default)]
    pub match_type: MatchTypeThresholds,
}

impl ScoringConfig {
    pub fn violations(&self) -> Vec<String> {
        let mut errors = self.weights.violations();
        errors.extend(self.bonuses.violations());
        errors
    }
}

/// Thresholds for the match-type heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchTypeThresholds {
    /// Short terms above this volume get phrase match
    #[serde(default = "default_phrase_min_volume")]
    pub phrase_min_volume: u64,

    /// Short terms have at most this many words
    #[serde(default = "default_phrase_max_words")]
    pub phrase_max_words: usize,

    /// Terms with at least this many words get exact match
    #[serde(default = "default_exact_min_words")]
    pub exact_min_words: usize,
}

impl Default for MatchTypeThresholds {
    fn default() -> Self {
        Self {
            phrase_min_volume: default_phrase_min_volume(),
            phrase_max_words: default_phrase_max_words(),
            exact_min_words: default_exact_min_words(),
        }
    }
}

fn default_phrase_min_volume() -> u64 {
    2000
}
fn default_phrase_max_words() -> usize {
    2
}
fn default_exact_min_words() -> usize {
    4
}
