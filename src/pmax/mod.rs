use std::collections::HashSet;

use crate::config::PmaxConfig;
use crate::core::{ScoredKeyword, Theme};
use crate::scoring::vocabulary::{tokenize, TermMatcher};

pub const PRODUCT_CATEGORY_THEME: &str = "Product Category Themes";
pub const USE_CASE_THEME: &str = "Use-case Based Themes";
pub const DEMOGRAPHIC_THEME: &str = "Demographic Themes";
pub const SEASONAL_THEME: &str = "Seasonal/Event-Based Themes";

/// Buckets top keywords into asset-group themes.
///
/// Membership is non-exclusive. Themes are emitted in a fixed order and
/// only when they have at least one member.
#[derive(Debug, Clone)]
pub struct ThemeExtractor {
    top_n: usize,
    max_terms_per_theme: usize,
    themes: Vec<(&'static str, TermMatcher)>,
}

impl ThemeExtractor {
    pub fn new(config: &PmaxConfig) -> Self {
        Self {
            top_n: config.top_n,
            max_terms_per_theme: config.max_terms_per_theme,
            themes: vec![
                (
                    PRODUCT_CATEGORY_THEME,
                    TermMatcher::new(&config.product_category_terms),
                ),
                (USE_CASE_THEME, TermMatcher::new(&config.use_case_terms)),
                (DEMOGRAPHIC_THEME, TermMatcher::new(&config.demographic_terms)),
                (SEASONAL_THEME, TermMatcher::new(&config.seasonal_terms)),
            ],
        }
    }

    pub fn extract(&self, keywords: &[ScoredKeyword]) -> Vec<Theme> {
        let mut top: Vec<&ScoredKeyword> = keywords.iter().collect();
        top.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        top.truncate(self.top_n);

        let tokenized: Vec<(&str, Vec<String>)> = top
            .iter()
            .map(|kw| (kw.term.as_str(), tokenize(&kw.term)))
            .collect();

        let themes: Vec<Theme> = self
            .themes
            .iter()
            .filter_map(|(name, matcher)| {
                let mut seen = HashSet::new();
                let member_terms: Vec<String> = tokenized
                    .iter()
                    .filter(|(_, tokens)| matcher.matches(tokens))
                    .filter(|(term, _)| seen.insert(term.to_lowercase()))
                    .map(|(term, _)| term.to_string())
                    .take(self.max_terms_per_theme)
                    .collect();

                (!member_terms.is_empty()).then(|| Theme {
                    name: name.to_string(),
                    member_terms,
                })
            })
            .collect();

        tracing::debug!(
            candidates = top.len(),
            themes = themes.len(),
            "Extracted asset-group themes"
        );
        themes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Competition, KeywordMetrics, MatchType};
    use pretty_assertions::assert_eq;

    fn kw(term: &str, relevance: f64) -> ScoredKeyword {
        ScoredKeyword {
            term: term.to_string(),
            metrics: KeywordMetrics {
                average_monthly_searches: 1000,
                bid_low: 1.0,
                bid_high: 2.0,
                competition_level: Competition::Medium,
            },
            relevance_score: relevance,
            suggested_match_type: MatchType::Broad,
        }
    }

    #[test]
    fn test_membership_is_non_exclusive() {
        let themes = ThemeExtractor::new(&PmaxConfig::default()).extract(&[
            kw("enterprise analytics platform", 0.9),
            kw("holiday marketing automation", 0.8),
            kw("kpi", 0.7),
        ]);

        let names: Vec<_> = themes.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                PRODUCT_CATEGORY_THEME,
                USE_CASE_THEME,
                DEMOGRAPHIC_THEME,
                SEASONAL_THEME
            ]
        );
        assert_eq!(
            themes[0].member_terms,
            vec!["enterprise analytics platform", "holiday marketing automation"]
        );
        assert_eq!(themes[1].member_terms, vec!["holiday marketing automation"]);
        assert_eq!(themes[2].member_terms, vec!["enterprise analytics platform"]);
    }

    #[test]
    fn test_only_top_n_considered_and_capped() {
        let config = PmaxConfig {
            top_n: 3,
            max_terms_per_theme: 2,
            ..PmaxConfig::default()
        };
        let keywords: Vec<_> = (0..5)
            .map(|i| kw(&format!("software {i}"), i as f64 / 10.0))
            .collect();
        let themes = ThemeExtractor::new(&config).extract(&keywords);
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].member_terms, vec!["software 4", "software 3"]);
    }

    #[test]
    fn test_no_matches_no_themes() {
        let themes = ThemeExtractor::new(&PmaxConfig::default()).extract(&[kw("kpi", 0.5)]);
        assert!(themes.is_empty());
        assert!(ThemeExtractor::new(&PmaxConfig::default())
            .extract(&[])
            .is_empty());
    }
}
