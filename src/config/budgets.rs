//! Budget-related configuration for the search, shopping and performance-max outputs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Expected share of clicks that convert (0.0-1.0]
    #[serde(default = "default_target_rate")]
    pub target_rate: f64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            target_rate: default_target_rate(),
        }
    }
}

fn default_target_rate() -> f64 {
    0.02
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_campaign_name")]
    pub campaign_name: String,

    /// Monthly search budget; zero or negative yields an empty campaign
    #[serde(default = "default_search_budget")]
    pub budget: f64,

    /// Traffic assumption: one click per keyword per day for this many days
    #[serde(default = "default_days_per_month")]
    pub days_per_month: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            campaign_name: default_campaign_name(),
            budget: default_search_budget(),
            days_per_month: default_days_per_month(),
        }
    }
}

fn default_campaign_name() -> String {
    "SEM Campaign - Search".to_string()
}
fn default_search_budget() -> f64 {
    2500.0
}
fn default_days_per_month() -> f64 {
    30.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingConfig {
    #[serde(default = "default_shopping_budget")]
    pub budget: f64,

    /// Explicit target cost per acquisition; derived from the budget when absent
    #[serde(default)]
    pub target_cpa: Option<f64>,

    /// Budget spent per assumed conversion when deriving the target CPA
    #[serde(default = "default_baseline_cost_per_conversion")]
    pub baseline_cost_per_conversion: f64,

    #[serde(default = "default_min_assumed_conversions")]
    pub min_assumed_conversions: u32,

    /// Floor on the target CPA so small budgets do not produce near-zero bids
    #[serde(default = "default_min_target_cpa")]
    pub min_target_cpa: f64,

    #[serde(default = "default_click_through_rate")]
    pub click_through_rate: f64,

    /// Stop accepting bids once this share of the budget is committed
    #[serde(default = "default_budget_utilization")]
    pub budget_utilization: f64,

    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

impl Default for ShoppingConfig {
    fn default() -> Self {
        Self {
            budget: default_shopping_budget(),
            target_cpa: None,
            baseline_cost_per_conversion: default_baseline_cost_per_conversion(),
            min_assumed_conversions: default_min_assumed_conversions(),
            min_target_cpa: default_min_target_cpa(),
            click_through_rate: default_click_through_rate(),
            budget_utilization: default_budget_utilization(),
            max_candidates: default_max_candidates(),
        }
    }
}

fn default_shopping_budget() -> f64 {
    1000.0
}
fn default_baseline_cost_per_conversion() -> f64 {
    60.0
}
fn default_min_assumed_conversions() -> u32 {
    10
}
fn default_min_target_cpa() -> f64 {
    5.0
}
fn default_click_through_rate() -> f64 {
    0.01
}
fn default_budget_utilization() -> f64 {
    0.9
}
fn default_max_candidates() -> usize {
    30
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PmaxConfig {
    /// How many of the highest-relevance keywords feed theme extraction
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default = "default_max_terms_per_theme")]
    pub max_terms_per_theme: usize,

    #[serde(default = "default_product_category_terms")]
    pub product_category_terms: Vec<String>,

    #[serde(default = "default_use_case_terms")]
    pub use_case_terms: Vec<String>,

    #[serde(default = "default_demographic_terms")]
    pub demographic_terms: Vec<String>,

    #[serde(default = "default_seasonal_terms")]
    pub seasonal_terms: Vec<String>,
}

impl Default for PmaxConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            max_terms_per_theme: default_max_terms_per_theme(),
            product_category_terms: default_product_category_terms(),
            use_case_terms: default_use_case_terms(),
            demographic_terms: default_demographic_terms(),
            seasonal_terms: default_seasonal_terms(),
        }
    }
}

fn default_top_n() -> usize {
    50
}
fn default_max_terms_per_theme() -> usize {
    15
}
fn default_product_category_terms() -> Vec<String> {
    [
        "platform",
        "software",
        "tools",
        "ai",
        "marketing",
        "analytics",
        "dashboard",
        "reporting",
        "automation",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_use_case_terms() -> Vec<String> {
    [
        "automation",
        "insights",
        "campaigns",
        "social media",
        "advertising",
        "lead generation",
        "customer service",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_demographic_terms() -> Vec<String> {
    ["enterprise", "b2b", "startup", "small business", "corporate"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_seasonal_terms() -> Vec<String> {
    ["2025", "q4", "festival", "holiday", "back to school"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Pure function: check a value is a finite number strictly inside (0, max]
fn in_unit_range(value: f64, max: f64) -> bool {
    value.is_finite() && value > 0.0 && value <= max
}

pub(crate) fn budget_violations(
    conversion: &ConversionConfig,
    search: &SearchConfig,
    shopping: &ShoppingConfig,
) -> Vec<String> {
    let mut errors = Vec::new();

    if !in_unit_range(conversion.target_rate, 1.0) {
        errors.push(format!(
            "conversion.target_rate must be in (0, 1], got {}",
            conversion.target_rate
        ));
    }
    if !search.budget.is_finite() {
        errors.push("search.budget must be a finite number".to_string());
    }
    if !in_unit_range(search.days_per_month, 31.0) {
        errors.push(format!(
            "search.days_per_month must be in (0, 31], got {}",
            search.days_per_month
        ));
    }
    if !shopping.budget.is_finite() {
        errors.push("shopping.budget must be a finite number".to_string());
    }
    if let Some(cpa) = shopping.target_cpa {
        if !(cpa.is_finite() && cpa > 0.0) {
            errors.push(format!("shopping.target_cpa must be positive, got {}", cpa));
        }
    }
    if !(shopping.baseline_cost_per_conversion.is_finite()
        && shopping.baseline_cost_per_conversion > 0.0)
    {
        errors.push(format!(
            "shopping.baseline_cost_per_conversion must be positive, got {}",
            shopping.baseline_cost_per_conversion
        ));
    }
    if shopping.min_assumed_conversions == 0 {
        errors.push("shopping.min_assumed_conversions must be at least 1".to_string());
    }
    if !(shopping.min_target_cpa.is_finite() && shopping.min_target_cpa >= 0.0) {
        errors.push(format!(
            "shopping.min_target_cpa must be non-negative, got {}",
            shopping.min_target_cpa
        ));
    }
    if !in_unit_range(shopping.click_through_rate, 1.0) {
        errors.push(format!(
            "shopping.click_through_rate must be in (0, 1], got {}",
            shopping.click_through_rate
        ));
    }
    if !in_unit_range(shopping.budget_utilization, 1.0) {
        errors.push(format!(
            "shopping.budget_utilization must be in (0, 1], got {}",
            shopping.budget_utilization
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_validation() {
        let errors = budget_violations(
            &ConversionConfig::default(),
            &SearchConfig::default(),
            &ShoppingConfig::default(),
        );
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_all_violations_collected() {
        let errors = budget_violations(
            &ConversionConfig { target_rate: 0.0 },
            &SearchConfig {
                budget: f64::INFINITY,
                ..SearchConfig::default()
            },
            &ShoppingConfig {
                click_through_rate: 2.0,
                ..ShoppingConfig::default()
            },
        );
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_negative_budget_is_allowed() {
        let errors = budget_violations(
            &ConversionConfig::default(),
            &SearchConfig {
                budget: -10.0,
                ..SearchConfig::default()
            },
            &ShoppingConfig::default(),
        );
        assert!(errors.is_empty());
    }
}
