//! Property-based tests for the planning stages
//!
//! These tests verify invariants that should hold for all inputs:
//! - Deduplication is idempotent
//! - Relevance scores stay in [0, 1] and do not depend on input order
//! - Aggregated CPC ranges are ordered and inside the keyword bid range
//! - Allocated ad groups never exceed the search budget
//! - Classification partitions the scored keywords
//! - Shopping bid spend never exceeds the shopping budget

use proptest::prelude::*;
use std::collections::HashMap;

use semplan::campaign::{aggregate_cpc_range, BudgetAllocator};
use semplan::config::PlannerConfig;
use semplan::keywords::Deduplicator;
use semplan::scoring::RelevanceScorer;
use semplan::shopping::RoasBidEngine;
use semplan::{Competition, IntentClassifier, KeywordRecord, Provenance};

const WORDS: &[&str] = &[
    "cubehq",
    "bi",
    "software",
    "business",
    "intelligence",
    "dashboard",
    "buy",
    "pricing",
    "in",
    "pune",
    "vs",
    "data",
    "analytics",
    "the",
    "reporting",
    "tool",
];

fn term() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..6).prop_map(|words| words.join(" "))
}

fn competition() -> impl Strategy<Value = Competition> {
    prop_oneof![
        Just(Competition::Low),
        Just(Competition::Medium),
        Just(Competition::High)
    ]
}

fn provenance() -> impl Strategy<Value = Provenance> {
    prop_oneof![
        Just(Provenance::Verified),
        Just(Provenance::Brand),
        Just(Provenance::Untagged),
        Just(Provenance::Estimated)
    ]
}

/// Bids are whole cents so rounded aggregates stay comparable.
fn record() -> impl Strategy<Value = KeywordRecord> {
    (
        term(),
        0u64..200_000,
        0u32..2_000,
        0u32..2_000,
        competition(),
        provenance(),
    )
        .prop_map(|(term, volume, a, b, competition, provenance)| {
            KeywordRecord::new(
                term,
                volume,
                f64::from(a) / 100.0,
                f64::from(b) / 100.0,
                competition,
                provenance,
            )
        })
}

fn records() -> impl Strategy<Value = Vec<KeywordRecord>> {
    prop::collection::vec(record(), 0..40)
}

fn scorer(config: &PlannerConfig) -> RelevanceScorer {
    RelevanceScorer::new(&config.scoring, &config.vocabulary).unwrap()
}

proptest! {
    #[test]
    fn prop_dedup_is_idempotent(batch in records()) {
        let dedup = Deduplicator::default();
        let once = dedup.deduplicate(&batch);
        let twice = dedup.deduplicate(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_scores_bounded_and_order_independent(batch in records()) {
        let config = PlannerConfig::default();
        let unique = Deduplicator::default().deduplicate(&batch);
        let scorer = scorer(&config);

        let forward = scorer.score_batch(&unique);
        let mut reversed_input = unique.clone();
        reversed_input.reverse();
        let backward: HashMap<String, f64> = scorer
            .score_batch(&reversed_input)
            .into_iter()
            .map(|k| (k.term, k.relevance_score))
            .collect();

        for keyword in &forward {
            prop_assert!((0.0..=1.0).contains(&keyword.relevance_score));
            prop_assert_eq!(Some(&keyword.relevance_score), backward.get(&keyword.term));
        }
    }

    #[test]
    fn prop_cpc_range_ordered_and_bounded(batch in records()) {
        let config = PlannerConfig::default();
        let scored = scorer(&config).score_batch(&batch);
        let range = aggregate_cpc_range(&scored);

        prop_assert!(range.low >= 0.0);
        prop_assert!(range.low <= range.high);

        if scored.iter().any(|k| k.metrics.average_monthly_searches > 0) {
            let weighted: Vec<_> = scored
                .iter()
                .filter(|k| k.metrics.average_monthly_searches > 0)
                .collect();
            let min_low = weighted.iter().map(|k| k.metrics.bid_low).fold(f64::INFINITY, f64::min);
            let max_high = weighted.iter().map(|k| k.metrics.bid_high).fold(0.0, f64::max);
            prop_assert!(range.low >= min_low - 0.005);
            prop_assert!(range.high <= max_high + 0.005);
        }
    }

    #[test]
    fn prop_allocation_never_exceeds_budget(batch in records(), budget in 0.0f64..5_000.0) {
        let config = PlannerConfig::default();
        let scored = scorer(&config).score_batch(&batch);
        let classifier = IntentClassifier::rule_based(&config.vocabulary, &config.classification);
        let (groups, _) = classifier.build_ad_groups(scored);

        let allocator = BudgetAllocator::default();
        let allocation = allocator.allocate(groups, budget);

        prop_assert!(allocator.total_spend(&allocation.groups) <= budget + 1e-9);
        prop_assert_eq!(allocation.summary.accepted_groups, allocation.groups.len());
    }

    #[test]
    fn prop_classification_partitions_keywords(batch in records()) {
        let config = PlannerConfig::default();
        let unique = Deduplicator::default().deduplicate(&batch);
        let scored = scorer(&config).score_batch(&unique);
        let classifier = IntentClassifier::rule_based(&config.vocabulary, &config.classification);
        let (groups, report) = classifier.build_ad_groups(scored.clone());

        let mut grouped: Vec<String> = groups
            .iter()
            .flat_map(|g| g.keywords.iter().map(|k| k.term.clone()))
            .collect();
        let mut expected: Vec<String> = scored.into_iter().map(|k| k.term).collect();
        grouped.sort();
        expected.sort();

        prop_assert_eq!(grouped, expected);
        prop_assert!(groups.iter().all(|g| !g.keywords.is_empty()));
        prop_assert!(!report.fell_back());
    }

    #[test]
    fn prop_shopping_spend_within_budget(batch in records(), budget in 0.0f64..3_000.0) {
        let mut config = PlannerConfig::default();
        config.shopping.budget = budget;
        let scored = scorer(&config).score_batch(&batch);
        let engine =
            RoasBidEngine::new(&config.shopping, &config.conversion, &config.vocabulary).unwrap();

        let bids = engine.suggest_bids(&scored);
        let spend: f64 = bids.iter().map(|b| b.estimated_monthly_spend).sum();

        prop_assert!(bids.len() <= config.shopping.max_candidates);
        // Per-bid spend is rounded to cents on output
        prop_assert!(spend <= budget + 0.005 * bids.len() as f64 + 1e-9);
        for bid in &bids {
            prop_assert!(bid.suggested_cpc >= bid.cpc_low && bid.suggested_cpc <= bid.cpc_high);
        }
    }
}
