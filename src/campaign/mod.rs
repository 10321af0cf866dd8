pub mod budget;
pub mod cpc_range;

pub use budget::{
    roas_potential, Allocation, AllocationSummary, BudgetAllocator, OPTIMIZED_SUFFIX,
};
pub use cpc_range::aggregate_cpc_range;

use crate::config::{ConversionConfig, SearchConfig};
use crate::core::{AdGroup, Campaign};

/// Fits classified ad groups into the search budget and wraps them in a [`Campaign`].
#[derive(Debug, Clone)]
pub struct SearchCampaignBuilder {
    search: SearchConfig,
    conversion: ConversionConfig,
}

impl SearchCampaignBuilder {
    pub fn new(search: &SearchConfig, conversion: &ConversionConfig) -> Self {
        Self {
            search: search.clone(),
            conversion: conversion.clone(),
        }
    }

    pub fn build(&self, ad_groups: Vec<AdGroup>) -> (Campaign, AllocationSummary) {
        let allocation =
            BudgetAllocator::new(self.search.days_per_month).allocate(ad_groups, self.search.budget);

        let campaign = Campaign {
            name: self.search.campaign_name.clone(),
            ad_groups: allocation.groups,
            total_budget: self.search.budget,
            target_conversion_rate: self.conversion.target_rate,
        };

        tracing::info!(
            ad_groups = campaign.ad_groups.len(),
            keywords = campaign.total_keywords(),
            average_cpc = campaign.average_cpc(),
            "Search campaign assembled"
        );
        (campaign, allocation.summary)
    }
}
