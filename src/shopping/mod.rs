//! ROAS-driven bid suggestions for product (shopping) keywords.
//!
//! ```text
//! target_cpa = configured, or budget / max(min_conversions, floor(budget / baseline))
//! target_cpc = max(target_cpa, min_target_cpa) * conversion_rate
//!
//! roas       = volume tier              (0.1 .. 0.3)
//!            + affordability vs target  (0.05 .. 0.3)
//!            + shopping-intent terms    (0.1 + 0.025 each, max 0.3)
//!            + competition sweet spot   (medium 0.1, low 0.08, high 0.05)
//! ```
//!
//! Bids are tiered by ROAS score and clamped into the keyword's observed
//! bid range. Suggestions are accepted in ROAS order while the estimated
//! spend fits the shopping budget.

use crate::config::{ConversionConfig, ShoppingConfig, VocabularyConfig};
use crate::core::{round_cents, BidPriority, BidSuggestion, Competition, ScoredKeyword};
use crate::errors::{Error, Result};
use crate::scoring::vocabulary::{tokenize, TermMatcher};

fn volume_score(volume: u64) -> f64 {
    match volume {
        v if v >= 50_000 => 0.3,
        v if v >= 10_000 => 0.25,
        v if v >= 1_000 => 0.2,
        _ => 0.1,
    }
}

fn affordability_score(average_cpc: f64, target_cpc: f64) -> f64 {
    if average_cpc <= target_cpc * 0.5 {
        0.3
    } else if average_cpc <= target_cpc {
        0.25
    } else if average_cpc <= target_cpc * 1.5 {
        0.15
    } else {
        0.05
    }
}

fn competition_score(level: Competition) -> f64 {
    match level {
        Competition::Medium => 0.1,
        Competition::Low => 0.08,
        Competition::High => 0.05,
    }
}

/// Raw bid for a score tier before clamping to the observed range.
fn tiered_bid(roas_score: f64, bid_high: f64, target_cpc: f64) -> f64 {
    if roas_score >= 0.8 {
        (bid_high * 0.9).min(target_cpc * 1.2)
    } else if roas_score >= 0.6 {
        (bid_high * 0.7).min(target_cpc)
    } else {
        (bid_high * 0.5).min(target_cpc * 0.8)
    }
}

fn engine_violations(shopping: &ShoppingConfig, conversion: &ConversionConfig) -> Vec<String> {
    let in_unit = |v: f64| v.is_finite() && v > 0.0 && v <= 1.0;
    let mut errors = Vec::new();

    if !in_unit(conversion.target_rate) {
        errors.push(format!(
            "conversion rate must be in (0, 1], got {}",
            conversion.target_rate
        ));
    }
    if !in_unit(shopping.click_through_rate) {
        errors.push(format!(
            "click-through rate must be in (0, 1], got {}",
            shopping.click_through_rate
        ));
    }
    if !in_unit(shopping.budget_utilization) {
        errors.push(format!(
            "budget utilization must be in (0, 1], got {}",
            shopping.budget_utilization
        ));
    }
    if !(shopping.baseline_cost_per_conversion.is_finite()
        && shopping.baseline_cost_per_conversion > 0.0)
    {
        errors.push("baseline cost per conversion must be positive".to_string());
    }
    if shopping.min_assumed_conversions == 0 {
        errors.push("assumed conversions must be at least 1".to_string());
    }

    errors
}

#[derive(Debug, Clone)]
pub struct RoasBidEngine {
    config: ShoppingConfig,
    conversion_rate: f64,
    intent_terms: TermMatcher,
}

impl RoasBidEngine {
    pub fn new(
        shopping: &ShoppingConfig,
        conversion: &ConversionConfig,
        vocabulary: &VocabularyConfig,
    ) -> Result<Self> {
        let violations = engine_violations(shopping, conversion);
        if !violations.is_empty() {
            return Err(Error::from_violations(&violations));
        }

        Ok(Self {
            config: shopping.clone(),
            conversion_rate: conversion.target_rate,
            intent_terms: TermMatcher::new(&vocabulary.shopping_intent_terms),
        })
    }

    /// Target cost per acquisition, floored at `min_target_cpa`.
    pub fn target_cpa(&self) -> f64 {
        let cpa = self.config.target_cpa.unwrap_or_else(|| {
            let budget = self.config.budget.max(0.0);
            let conversions = (budget / self.config.baseline_cost_per_conversion)
                .floor()
                .max(f64::from(self.config.min_assumed_conversions));
            budget / conversions
        });
        cpa.max(self.config.min_target_cpa)
    }

    pub fn target_cpc(&self) -> f64 {
        round_cents(self.target_cpa() * self.conversion_rate)
    }

    pub fn roas_score(&self, keyword: &ScoredKeyword, target_cpc: f64) -> f64 {
        let tokens = tokenize(&keyword.term);
        let intent = (0.1 + 0.025 * self.intent_terms.count_matches(&tokens) as f64).min(0.3);

        let score = volume_score(keyword.metrics.average_monthly_searches)
            + affordability_score(keyword.metrics.average_bid(), target_cpc)
            + intent
            + competition_score(keyword.metrics.competition_level);
        score.min(1.0)
    }

    pub fn suggest_bids(&self, keywords: &[ScoredKeyword]) -> Vec<BidSuggestion> {
        let target_cpc = self.target_cpc();
        tracing::info!(
            budget = self.config.budget,
            target_cpa = self.target_cpa(),
            target_cpc,
            "Computing shopping bids"
        );
        self.suggest_bids_with_target_cpc(keywords, target_cpc)
    }

    /// Suggest bids against an explicit target CPC.
    pub fn suggest_bids_with_target_cpc(
        &self,
        keywords: &[ScoredKeyword],
        target_cpc: f64,
    ) -> Vec<BidSuggestion> {
        let budget = self.config.budget;
        if keywords.is_empty() || budget.is_nan() || budget <= 0.0 {
            return Vec::new();
        }

        let mut ranked: Vec<(f64, &ScoredKeyword)> = keywords
            .iter()
            .map(|kw| (self.roas_score(kw, target_cpc), kw))
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

        let stop_at = budget * self.config.budget_utilization;
        let mut total = 0.0;
        let mut suggestions = Vec::new();

        for (score, kw) in ranked.into_iter().take(self.config.max_candidates) {
            let low = kw.metrics.bid_low;
            let high = kw.metrics.bid_high;
            let bid = tiered_bid(score, high, target_cpc).clamp(low, high);
            let spend = bid
                * kw.metrics.average_monthly_searches as f64
                * self.config.click_through_rate;

            if total + spend <= budget {
                total += spend;
                suggestions.push(BidSuggestion {
                    product_hint: kw.term.clone(),
                    suggested_cpc: round_cents(bid),
                    cpc_low: round_cents(low),
                    cpc_high: round_cents(high),
                    search_volume: kw.metrics.average_monthly_searches,
                    roas_score: round_cents(score),
                    estimated_monthly_spend: round_cents(spend),
                    priority: BidPriority::from_roas_score(score),
                });
            }

            if total >= stop_at {
                break;
            }
        }

        tracing::info!(
            suggestions = suggestions.len(),
            estimated_spend = total,
            "Shopping bids suggested"
        );
        suggestions
    }
}
