//! Ad-group bucket taxonomy
//!
//! Every classified keyword lands in exactly one bucket. Buckets are emitted
//! in declaration order, and each one maps onto a coarse intent category that
//! the budget allocator uses for prioritization.

use crate::core::IntentCategory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdGroupBucket {
    /// Brand name and brand-plus-modifier terms
    Brand,
    /// Terms naming a city or using a location connector
    Location,
    /// Core category (business intelligence) terms
    CoreCategory,
    /// Terms with explicit buying intent
    Commercial,
    /// Product and solution terms
    Product,
    /// Long, specific, or low-competition niche terms
    LongTail,
    /// Competitor names and comparison queries
    Competitor,
    /// Feature and capability terms; only the model strategy assigns these
    TechnicalFeatures,
}

impl AdGroupBucket {
    pub const ALL: [AdGroupBucket; 8] = [
        AdGroupBucket::Brand,
        AdGroupBucket::Location,
        AdGroupBucket::CoreCategory,
        AdGroupBucket::Commercial,
        AdGroupBucket::Product,
        AdGroupBucket::LongTail,
        AdGroupBucket::Competitor,
        AdGroupBucket::TechnicalFeatures,
    ];

    /// Ad group name, also used as the candidate label handed to a model
    pub fn label(&self) -> &'static str {
        match self {
            AdGroupBucket::Brand => "Brand Terms",
            AdGroupBucket::Location => "Location-based Queries",
            AdGroupBucket::CoreCategory => "Core Business Intelligence",
            AdGroupBucket::Commercial => "Commercial Intent High-Value",
            AdGroupBucket::Product => "Data Analytics Solutions",
            AdGroupBucket::LongTail => "Long-Tail Opportunities",
            AdGroupBucket::Competitor => "Competitive Analysis",
            AdGroupBucket::TechnicalFeatures => "Technical Features",
        }
    }

    pub fn intent_category(&self) -> IntentCategory {
        match self {
            AdGroupBucket::Brand => IntentCategory::Brand,
            AdGroupBucket::Location => IntentCategory::Location,
            AdGroupBucket::CoreCategory => IntentCategory::Category,
            AdGroupBucket::Commercial => IntentCategory::Commercial,
            AdGroupBucket::Product => IntentCategory::Product,
            AdGroupBucket::LongTail => IntentCategory::LongTail,
            AdGroupBucket::Competitor => IntentCategory::Competitor,
            AdGroupBucket::TechnicalFeatures => IntentCategory::Product,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AdGroupBucket::Brand => "Brand name variations and company-specific terms",
            AdGroupBucket::Location => "Geographic-targeted category and product keywords",
            AdGroupBucket::CoreCategory => "Primary business intelligence and analytics keywords",
            AdGroupBucket::Commercial => "Keywords showing strong buying intent and commercial value",
            AdGroupBucket::Product => "Specific data analytics and dashboard-related keywords",
            AdGroupBucket::LongTail => "Specific, lower competition long-tail keywords",
            AdGroupBucket::Competitor => "Keywords related to competitor analysis and comparison",
            AdGroupBucket::TechnicalFeatures => "Technical features and capabilities keywords",
        }
    }

    /// Resolve a label returned by a model. Matching ignores case and
    /// surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.label().eq_ignore_ascii_case(label))
    }

    pub fn candidate_labels() -> Vec<&'static str> {
        Self::ALL.iter().map(AdGroupBucket::label).collect()
    }
}

impl std::fmt::Display for AdGroupBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
