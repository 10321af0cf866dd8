//! Multi-criteria relevance scoring for deduplicated keyword records.
//!
//! The score is a weighted sum of four components, each capped at its
//! weight before summing:
//!
//! ```text
//! volume        = w_vol  * volume / max_batch_volume
//! competition   = w_comp * {low: 1.0, medium: 0.75, high: 0.5}
//! cpc_eff       = w_cpc  * max(0, (max_batch_cpc - avg_cpc) / max_batch_cpc)
//! domain        = clamp(bonuses - penalties, -w_dom, w_dom)
//! relevance     = clamp(volume + competition + cpc_eff + domain, 0, 1)
//! ```
//!
//! Batch statistics are computed once per run in [`BatchContext`] so that the
//! processing order never changes any keyword's score.

use crate::config::{ScoringConfig, VocabularyConfig};
use crate::core::{Competition, KeywordMetrics, KeywordRecord, MatchType, ScoredKeyword};
use crate::errors::{Error, Result};
use crate::scoring::vocabulary::{tokenize, TermMatcher};
use serde::{Deserialize, Serialize};

/// Batch-wide maxima shared by every keyword scored in one run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchContext {
    pub max_volume: u64,
    /// Highest `cpc_high` in the batch
    pub max_cpc: f64,
}

impl BatchContext {
    pub fn from_records(records: &[KeywordRecord]) -> Self {
        records.iter().fold(Self::default(), |ctx, r| Self {
            max_volume: ctx.max_volume.max(r.search_volume),
            max_cpc: ctx.max_cpc.max(r.cpc_high),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub volume: f64,         // 0..=w_vol
    pub competition: f64,    // 0..=w_comp
    pub cpc_efficiency: f64, // 0..=w_cpc
    pub domain: f64,         // -w_dom..=w_dom
    pub total: f64,          // clamped to [0, 1]
}

fn competition_factor(level: Competition) -> f64 {
    match level {
        Competition::Low => 1.0,
        Competition::Medium => 0.75,
        Competition::High => 0.5,
    }
}

#[derive(Debug, Clone)]
struct DomainMatchers {
    brand: TermMatcher,
    core_phrases: TermMatcher,
    category: TermMatcher,
    generic: TermMatcher,
    commercial: TermMatcher,
    filler: TermMatcher,
}

#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    config: ScoringConfig,
    matchers: DomainMatchers,
}

impl RelevanceScorer {
    /// Build a scorer. Out-of-range or non-finite weights are a caller
    /// contract violation and are rejected here.
    pub fn new(config: &ScoringConfig, vocabulary: &VocabularyConfig) -> Result<Self> {
        let violations = config.violations();
        if !violations.is_empty() {
            return Err(Error::from_violations(&violations));
        }

        let relevance = &vocabulary.relevance;
        Ok(Self {
            config: config.clone(),
            matchers: DomainMatchers {
                brand: TermMatcher::new(&vocabulary.brand_terms),
                core_phrases: TermMatcher::new(&relevance.core_phrases),
                category: TermMatcher::new(&relevance.category_terms),
                generic: TermMatcher::new(&relevance.generic_terms),
                commercial: TermMatcher::new(&relevance.commercial_terms),
                filler: TermMatcher::new(&relevance.filler_words),
            },
        })
    }

    /// Score every record against statistics of the whole batch (1:1, no filtering).
    pub fn score_batch(&self, records: &[KeywordRecord]) -> Vec<ScoredKeyword> {
        let ctx = BatchContext::from_records(records);
        tracing::debug!(
            keywords = records.len(),
            max_volume = ctx.max_volume,
            max_cpc = ctx.max_cpc,
            "Scoring keyword batch"
        );
        records.iter().map(|r| self.score(r, &ctx)).collect()
    }

    pub fn score(&self, record: &KeywordRecord, ctx: &BatchContext) -> ScoredKeyword {
        let tokens = tokenize(&record.term);
        ScoredKeyword {
            term: record.term.clone(),
            metrics: KeywordMetrics::from(record),
            relevance_score: self.breakdown_tokens(record, &tokens, ctx).total,
            suggested_match_type: self.match_type_tokens(record, &tokens),
        }
    }

    pub fn breakdown(&self, record: &KeywordRecord, ctx: &BatchContext) -> ScoreBreakdown {
        self.breakdown_tokens(record, &tokenize(&record.term), ctx)
    }

    fn breakdown_tokens(
        &self,
        record: &KeywordRecord,
        tokens: &[String],
        ctx: &BatchContext,
    ) -> ScoreBreakdown {
        let weights = &self.config.weights;

        let volume = if ctx.max_volume > 0 {
            (record.search_volume as f64 / ctx.max_volume as f64 * weights.volume)
                .min(weights.volume)
        } else {
            0.0
        };

        let competition = competition_factor(record.competition) * weights.competition;

        let cpc_efficiency = if ctx.max_cpc > 0.0 {
            ((ctx.max_cpc - record.average_cpc()) / ctx.max_cpc)
                .clamp(0.0, 1.0)
                * weights.cpc_efficiency
        } else {
            0.0
        };

        let domain = self
            .domain_adjustment(tokens)
            .clamp(-weights.domain, weights.domain);

        let total = (volume + competition + cpc_efficiency + domain).clamp(0.0, 1.0);

        ScoreBreakdown {
            volume,
            competition,
            cpc_efficiency,
            domain,
            total,
        }
    }

    /// Uncapped sum of domain bonuses and penalties for a tokenized term.
    fn domain_adjustment(&self, tokens: &[String]) -> f64 {
        let bonuses = &self.config.bonuses;
        let m = &self.matchers;

        let tier = if m.core_phrases.matches(tokens) {
            bonuses.core_phrase
        } else if m.category.matches(tokens) {
            bonuses.category_term
        } else if m.generic.matches(tokens) {
            bonuses.generic_term
        } else {
            0.0
        };

        let brand = if m.brand.matches(tokens) {
            bonuses.brand
        } else {
            0.0
        };
        let commercial = if m.commercial.matches(tokens) {
            bonuses.commercial
        } else {
            0.0
        };
        let penalty = if m.filler.matches(tokens) {
            bonuses.filler_penalty
        } else {
            0.0
        };

        tier + brand + commercial - penalty
    }

    /// Brand terms get exact; short high-volume terms phrase; long terms exact; rest broad.
    pub fn suggest_match_type(&self, record: &KeywordRecord) -> MatchType {
        self.match_type_tokens(record, &tokenize(&record.term))
    }

    fn match_type_tokens(&self, record: &KeywordRecord, tokens: &[String]) -> MatchType {
        let thresholds = &self.config.match_type;
        let words = record.word_count();

        if self.matchers.brand.matches(tokens) {
            MatchType::Exact
        } else if words <= thresholds.phrase_max_words
            && record.search_volume > thresholds.phrase_min_volume
        {
            MatchType::Phrase
        } else if words >= thresholds.exact_min_words {
            MatchType::Exact
        } else {
            MatchType::Broad
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringWeights;
    use crate::core::Provenance;

    fn scorer() -> RelevanceScorer {
        RelevanceScorer::new(&ScoringConfig::default(), &VocabularyConfig::default()).unwrap()
    }

    fn record(term: &str, volume: u64, low: f64, high: f64, comp: Competition) -> KeywordRecord {
        KeywordRecord::new(term, volume, low, high, comp, Provenance::Verified)
    }

    #[test]
    fn test_negative_weight_is_contract_violation() {
        let config = ScoringConfig {
            weights: ScoringWeights {
                competition: -0.2,
                ..ScoringWeights::default()
            },
            ..ScoringConfig::default()
        };
        let result = RelevanceScorer::new(&config, &VocabularyConfig::default());
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_batch_context_uses_maxima() {
        let records = vec![
            record("a", 100, 0.5, 4.0, Competition::Low),
            record("b", 900, 1.0, 2.0, Competition::Low),
        ];
        let ctx = BatchContext::from_records(&records);
        assert_eq!(ctx.max_volume, 900);
        assert_eq!(ctx.max_cpc, 4.0);
    }

    #[test]
    fn test_components_are_capped_at_weights() {
        let scorer = scorer();
        let r = record(
            "cubehq business intelligence software platform",
            5000,
            0.0,
            0.0,
            Competition::Low,
        );
        let ctx = BatchContext {
            max_volume: 5000,
            max_cpc: 3.0,
        };
        let b = scorer.breakdown(&r, &ctx);
        assert!((b.volume - 0.3).abs() < 1e-9);
        assert!((b.competition - 0.2).abs() < 1e-9);
        assert!((b.cpc_efficiency - 0.2).abs() < 1e-9);
        // 0.25 + 0.2 + 0.15 exceeds the domain cap
        assert!((b.domain - 0.3).abs() < 1e-9);
        assert_eq!(b.total, 1.0);
    }

    #[test]
    fn test_filler_penalty_reduces_score() {
        let scorer = scorer();
        let ctx = BatchContext {
            max_volume: 1000,
            max_cpc: 2.0,
        };
        let clean = scorer.breakdown(
            &record("sales pipeline", 500, 1.0, 2.0, Competition::High),
            &ctx,
        );
        let filler = scorer.breakdown(
            &record("see more over", 500, 1.0, 2.0, Competition::High),
            &ctx,
        );
        assert!((clean.domain - 0.0).abs() < 1e-9);
        assert!((filler.domain + 0.1).abs() < 1e-9);
        assert!(filler.total < clean.total);
        assert!(filler.total >= 0.0);
    }

    #[test]
    fn test_domain_tiers_are_exclusive() {
        let scorer = scorer();
        let ctx = BatchContext::default();
        let high = |term: &str| record(term, 1, 0.0, 0.0, Competition::High);
        let core = scorer.breakdown(&high("business intelligence analytics"), &ctx);
        let generic = scorer.breakdown(&high("data lake"), &ctx);
        assert!((core.domain - 0.25).abs() < 1e-9);
        assert!((generic.domain - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_zero_batch_maxima_do_not_divide_by_zero() {
        let scorer = scorer();
        let r = record("report builder", 0, 0.0, 0.0, Competition::Medium);
        let b = scorer.breakdown(&r, &BatchContext::default());
        assert_eq!(b.volume, 0.0);
        assert_eq!(b.cpc_efficiency, 0.0);
        assert!((b.total - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_score_is_independent_of_batch_order() {
        let scorer = scorer();
        let records = vec![
            record("bi software", 8000, 1.0, 3.0, Competition::Medium),
            record("dashboard tool", 1200, 0.5, 1.5, Competition::Low),
            record("cubehq", 400, 0.2, 0.9, Competition::Low),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = scorer.score_batch(&records);
        let mut backward = scorer.score_batch(&reversed);
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_match_type_heuristic() {
        let scorer = scorer();
        let mt = |term: &str, volume: u64| {
            scorer.suggest_match_type(&record(term, volume, 1.0, 2.0, Competition::Low))
        };
        assert_eq!(mt("cubehq pricing", 10), MatchType::Exact);
        assert_eq!(mt("bi tools", 2500), MatchType::Phrase);
        assert_eq!(mt("bi tools", 2000), MatchType::Broad);
        assert_eq!(mt("best bi tools for retail", 50), MatchType::Exact);
        assert_eq!(mt("bi reporting tools", 9000), MatchType::Broad);
    }
}
