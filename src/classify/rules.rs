use super::{AdGroupBucket, ClassificationStrategy, StrategyKind};
use crate::config::{ClassificationConfig, VocabularyConfig};
use crate::core::{Competition, ScoredKeyword};
use crate::errors::CapabilityError;
use crate::scoring::vocabulary::{tokenize, TermMatcher};

/// Deterministic first-match rule list.
///
/// Rules are evaluated top to bottom and are mutually exclusive:
/// brand, location, commercial, core category, product, long tail,
/// competitor, then a volume-based fallback into core category or product.
#[derive(Debug, Clone)]
pub struct RuleBasedClassifier {
    brand: TermMatcher,
    locations: TermMatcher,
    connectors: TermMatcher,
    commercial: TermMatcher,
    core_category: TermMatcher,
    product: TermMatcher,
    competitor: TermMatcher,
    thresholds: ClassificationConfig,
}

impl RuleBasedClassifier {
    pub fn new(vocabulary: &VocabularyConfig, thresholds: &ClassificationConfig) -> Self {
        Self {
            brand: TermMatcher::new(&vocabulary.brand_terms),
            locations: TermMatcher::new(&vocabulary.location_terms),
            connectors: TermMatcher::new(&vocabulary.location_connectors),
            commercial: TermMatcher::new(&vocabulary.commercial_terms),
            core_category: TermMatcher::new(&vocabulary.core_category_terms),
            product: TermMatcher::new(&vocabulary.product_terms),
            competitor: TermMatcher::new(&vocabulary.competitor_terms),
            thresholds: thresholds.clone(),
        }
    }

    pub fn bucket_for(&self, keyword: &ScoredKeyword) -> AdGroupBucket {
        let tokens = tokenize(&keyword.term);
        let volume = keyword.metrics.average_monthly_searches;

        if self.brand.matches(&tokens) {
            AdGroupBucket::Brand
        } else if self.locations.matches(&tokens) || self.connectors.matches_interior(&tokens) {
            AdGroupBucket::Location
        } else if self.commercial.matches(&tokens) {
            AdGroupBucket::Commercial
        } else if self.core_category.matches(&tokens) {
            AdGroupBucket::CoreCategory
        } else if self.product.matches(&tokens) {
            AdGroupBucket::Product
        } else if self.is_long_tail(keyword) {
            AdGroupBucket::LongTail
        } else if self.competitor.matches(&tokens) {
            AdGroupBucket::Competitor
        } else if volume > self.thresholds.fallback_core_min_volume {
            AdGroupBucket::CoreCategory
        } else {
            AdGroupBucket::Product
        }
    }

    fn is_long_tail(&self, keyword: &ScoredKeyword) -> bool {
        keyword.word_count() >= self.thresholds.long_tail_min_words
            || (keyword.metrics.average_monthly_searches < self.thresholds.long_tail_max_volume
                && keyword.metrics.competition_level == Competition::Low)
    }
}

impl ClassificationStrategy for RuleBasedClassifier {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RuleBased
    }

    fn classify(&self, keyword: &ScoredKeyword) -> Result<AdGroupBucket, CapabilityError> {
        Ok(self.bucket_for(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{KeywordMetrics, MatchType};

    fn kw(term: &str, volume: u64, competition: Competition) -> ScoredKeyword {
        ScoredKeyword {
            term: term.to_string(),
            metrics: KeywordMetrics {
                average_monthly_searches: volume,
                bid_low: 1.0,
                bid_high: 2.0,
                competition_level: competition,
            },
            relevance_score: 0.5,
            suggested_match_type: MatchType::Broad,
        }
    }

    fn classifier() -> RuleBasedClassifier {
        RuleBasedClassifier::new(&VocabularyConfig::default(), &ClassificationConfig::default())
    }

    #[test]
    fn test_brand_wins_over_everything() {
        let c = classifier();
        assert_eq!(
            c.bucket_for(&kw("cubehq pricing in mumbai", 50, Competition::Low)),
            AdGroupBucket::Brand
        );
    }

    #[test]
    fn test_location_by_city_or_connector() {
        let c = classifier();
        assert_eq!(
            c.bucket_for(&kw("bi software pune", 3000, Competition::High)),
            AdGroupBucket::Location
        );
        assert_eq!(
            c.bucket_for(&kw("analytics agencies in india", 3000, Competition::High)),
            AdGroupBucket::Location
        );
    }

    #[test]
    fn test_commercial_before_core_category() {
        let c = classifier();
        assert_eq!(
            c.bucket_for(&kw("buy bi software near me", 300, Competition::High)),
            AdGroupBucket::Commercial
        );
        assert_eq!(
            c.bucket_for(&kw("business intelligence platform", 8000, Competition::Medium)),
            AdGroupBucket::CoreCategory
        );
    }

    #[test]
    fn test_product_terms() {
        let c = classifier();
        assert_eq!(
            c.bucket_for(&kw("sales dashboards", 900, Competition::Low)),
            AdGroupBucket::Product
        );
    }

    #[test]
    fn test_long_tail_precedes_competitor() {
        let c = classifier();
        assert_eq!(
            c.bucket_for(&kw("tableau vs looker for startups", 5000, Competition::High)),
            AdGroupBucket::LongTail
        );
        assert_eq!(
            c.bucket_for(&kw("niche metric", 400, Competition::Low)),
            AdGroupBucket::LongTail
        );
        assert_eq!(
            c.bucket_for(&kw("tableau alternative", 5000, Competition::High)),
            AdGroupBucket::Competitor
        );
    }

    #[test]
    fn test_fallback_by_volume() {
        let c = classifier();
        assert_eq!(
            c.bucket_for(&kw("kpi tracking", 2500, Competition::Medium)),
            AdGroupBucket::CoreCategory
        );
        assert_eq!(
            c.bucket_for(&kw("kpi tracking", 2000, Competition::Medium)),
            AdGroupBucket::Product
        );
    }
}
