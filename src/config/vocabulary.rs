//! Domain vocabularies used by scoring, classification, bidding and themes.
//!
//! Every list is matched on word boundaries (see
//! [`crate::scoring::vocabulary::TermMatcher`]). The defaults describe a
//! business-intelligence/analytics advertiser; override them per client.

use serde::{Deserialize, Serialize};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyConfig {
    #[serde(default = "default_brand_terms")]
    pub brand_terms: Vec<String>,

    #[serde(default = "default_competitor_terms")]
    pub competitor_terms: Vec<String>,

    #[serde(default = "default_location_terms")]
    pub location_terms: Vec<String>,

    /// Words that mark a location query when they sit inside a term ("bi tools in pune")
    #[serde(default = "default_location_connectors")]
    pub location_connectors: Vec<String>,

    /// Buying-intent words used by the classifier
    #[serde(default = "default_commercial_terms")]
    pub commercial_terms: Vec<String>,

    #[serde(default = "default_core_category_terms")]
    pub core_category_terms: Vec<String>,

    #[serde(default = "default_product_terms")]
    pub product_terms: Vec<String>,

    #[serde(default)]
    pub relevance: RelevanceVocabulary,

    /// Commercial words counted by the shopping ROAS score
    #[serde(default = "default_shopping_intent_terms")]
    pub shopping_intent_terms: Vec<String>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            brand_terms: default_brand_terms(),
            competitor_terms: default_competitor_terms(),
            location_terms: default_location_terms(),
            location_connectors: default_location_connectors(),
            commercial_terms: default_commercial_terms(),
            core_category_terms: default_core_category_terms(),
            product_terms: default_product_terms(),
            relevance: RelevanceVocabulary::default(),
            shopping_intent_terms: default_shopping_intent_terms(),
        }
    }
}

fn default_brand_terms() -> Vec<String> {
    strings(&["cubehq", "cube hq", "cube"])
}
fn default_competitor_terms() -> Vec<String> {
    strings(&[
        "reputation",
        "birdeye",
        "podium",
        "vs",
        "compare",
        "alternative",
        "competitor",
    ])
}
fn default_location_terms() -> Vec<String> {
    strings(&[
        "bengaluru",
        "bangalore",
        "mumbai",
        "delhi",
        "hyderabad",
        "chennai",
        "pune",
        "kolkata",
    ])
}
fn default_location_connectors() -> Vec<String> {
    strings(&["in"])
}
fn default_commercial_terms() -> Vec<String> {
    strings(&[
        "buy",
        "purchase",
        "pricing",
        "cost",
        "service",
        "company",
        "provider",
        "vendor",
        "subscription",
        "plan",
    ])
}
fn default_core_category_terms() -> Vec<String> {
    strings(&[
        "business intelligence",
        "bi tool",
        "bi platform",
        "intelligence platform",
        "bi software",
    ])
}
fn default_product_terms() -> Vec<String> {
    strings(&[
        "data analytics",
        "analytics platform",
        "data visualization",
        "dashboard",
        "reporting",
        "analytics software",
    ])
}
fn default_shopping_intent_terms() -> Vec<String> {
    strings(&[
        "buy",
        "purchase",
        "software",
        "solution",
        "platform",
        "tool",
        "service",
        "management",
    ])
}

/// Vocabulary tiers for the relevance scorer's domain bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceVocabulary {
    #[serde(default = "default_core_phrases")]
    pub core_phrases: Vec<String>,

    #[serde(default = "default_category_terms")]
    pub category_terms: Vec<String>,

    #[serde(default = "default_generic_terms")]
    pub generic_terms: Vec<String>,

    #[serde(default = "default_commercial_terms_for_relevance")]
    pub commercial_terms: Vec<String>,

    /// Extraction artifacts ("see more", "get the")
    #[serde(default = "default_filler_words")]
    pub filler_words: Vec<String>,
}

impl Default for RelevanceVocabulary {
    fn default() -> Self {
        Self {
            core_phrases: default_core_phrases(),
            category_terms: default_category_terms(),
            generic_terms: default_generic_terms(),
            commercial_terms: default_commercial_terms_for_relevance(),
            filler_words: default_filler_words(),
        }
    }
}

fn default_core_phrases() -> Vec<String> {
    strings(&["business intelligence", "bi software", "analytics platform"])
}
fn default_category_terms() -> Vec<String> {
    strings(&["analytics", "dashboard", "reporting", "data visualization"])
}
fn default_generic_terms() -> Vec<String> {
    strings(&["data", "insights", "intelligence"])
}
fn default_commercial_terms_for_relevance() -> Vec<String> {
    strings(&["software", "platform", "tool", "solution"])
}
fn default_filler_words() -> Vec<String> {
    strings(&["get", "see", "more", "over", "the", "and"])
}
