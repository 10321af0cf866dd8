//! Flat export records for presentation and export collaborators.

use super::{round_cents, AdGroup, Campaign, ScoredKeyword};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeywordRow {
    pub term: String,
    pub search_volume: u64,
    pub bid_low: f64,
    pub bid_high: f64,
    pub competition: String,
    pub match_type: String,
    pub relevance_score: f64,
}

impl From<&ScoredKeyword> for KeywordRow {
    fn from(kw: &ScoredKeyword) -> Self {
        Self {
            term: kw.term.clone(),
            search_volume: kw.metrics.average_monthly_searches,
            bid_low: kw.metrics.bid_low,
            bid_high: kw.metrics.bid_high,
            competition: kw.metrics.competition_level.as_str().to_string(),
            match_type: kw.suggested_match_type.as_str().to_string(),
            relevance_score: round_cents(kw.relevance_score),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdGroupRecord {
    pub name: String,
    pub intent_category: String,
    pub theme_description: String,
    pub suggested_cpc_low: f64,
    pub suggested_cpc_high: f64,
    pub keyword_count: usize,
    pub keywords: Vec<KeywordRow>,
}

impl From<&AdGroup> for AdGroupRecord {
    fn from(group: &AdGroup) -> Self {
        Self {
            name: group.name.clone(),
            intent_category: group.intent_category.label().to_string(),
            theme_description: group.theme_description.clone(),
            suggested_cpc_low: group.suggested_cpc_range.low,
            suggested_cpc_high: group.suggested_cpc_range.high,
            keyword_count: group.keywords.len(),
            keywords: group.keywords.iter().map(KeywordRow::from).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub campaign_name: String,
    pub total_budget: f64,
    pub target_conversion_rate: f64,
    pub total_ad_groups: usize,
    pub total_keywords: usize,
    pub average_cpc: f64,
    pub ad_groups: Vec<AdGroupRecord>,
}

impl From<&Campaign> for CampaignRecord {
    fn from(campaign: &Campaign) -> Self {
        Self {
            campaign_name: campaign.name.clone(),
            total_budget: campaign.total_budget,
            target_conversion_rate: campaign.target_conversion_rate,
            total_ad_groups: campaign.ad_groups.len(),
            total_keywords: campaign.total_keywords(),
            average_cpc: round_cents(campaign.average_cpc()),
            ad_groups: campaign.ad_groups.iter().map(AdGroupRecord::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Competition, CpcRange, IntentCategory, KeywordMetrics, MatchType};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ad_group_record_flattens_keywords_in_order() {
        let group = AdGroup {
            name: "Brand Terms".into(),
            intent_category: IntentCategory::Brand,
            keywords: vec![ScoredKeyword {
                term: "cubehq".into(),
                metrics: KeywordMetrics {
                    average_monthly_searches: 1200,
                    bid_low: 0.8,
                    bid_high: 2.4,
                    competition_level: Competition::Low,
                },
                relevance_score: 0.71234,
                suggested_match_type: MatchType::Exact,
            }],
            suggested_cpc_range: CpcRange::new(0.8, 2.4),
            theme_description: "Brand name variations".into(),
        };

        let record = group.to_record();

        assert_eq!(record.intent_category, "Brand Terms");
        assert_eq!(record.keyword_count, 1);
        assert_eq!(
            record.keywords[0],
            KeywordRow {
                term: "cubehq".into(),
                search_volume: 1200,
                bid_low: 0.8,
                bid_high: 2.4,
                competition: "low".into(),
                match_type: "exact".into(),
                relevance_score: 0.71,
            }
        );
    }
}
