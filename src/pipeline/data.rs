//! Results produced by one planning run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::campaign::AllocationSummary;
use crate::classify::ClassificationReport;
use crate::core::{BidSuggestion, Campaign, CampaignRecord, Theme};

/// Record counts after each stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Records handed over by collectors
    pub raw_records: usize,
    /// Records with a usable term
    pub usable_records: usize,
    pub deduplicated: usize,
    /// Records that passed the provenance volume thresholds
    pub qualified: usize,
    pub scored: usize,
    /// Keywords left in the campaign after budget allocation
    pub allocated_keywords: usize,
}

/// Everything a planning run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignPlan {
    pub campaign: Campaign,
    pub allocation: AllocationSummary,
    pub classification: ClassificationReport,
    pub themes: Vec<Theme>,
    pub bid_suggestions: Vec<BidSuggestion>,
    pub stats: RunStats,
}

impl CampaignPlan {
    /// Theme name to member terms.
    pub fn themes_by_name(&self) -> BTreeMap<String, Vec<String>> {
        self.themes
            .iter()
            .map(|t| (t.name.clone(), t.member_terms.clone()))
            .collect()
    }

    /// Flat shape handed to exporters.
    pub fn to_export(&self) -> PlanExport {
        PlanExport {
            search_campaign: self.campaign.to_record(),
            pmax_themes: self.themes.clone(),
            shopping_bids: self.bid_suggestions.clone(),
            classification: self.classification.clone(),
            allocation: self.allocation.clone(),
            stats: self.stats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanExport {
    pub search_campaign: CampaignRecord,
    pub pmax_themes: Vec<Theme>,
    pub shopping_bids: Vec<BidSuggestion>,
    pub classification: ClassificationReport,
    pub allocation: AllocationSummary,
    pub stats: RunStats,
}
