pub mod input;
pub mod records;

use serde::{Deserialize, Serialize};

pub use input::{estimate_search_volume, RawKeyword, RecordBuilder, TextField};
pub use records::{AdGroupRecord, CampaignRecord, KeywordRow};

/// Round a monetary value or score to two decimals.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Competition {
    Low,
    #[default]
    Medium,
    High,
}

impl Competition {
    /// Parse a competition label, defaulting to `Medium` for anything unknown.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Competition::Low,
            "high" => Competition::High,
            _ => Competition::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Competition::Low => "low",
            Competition::Medium => "medium",
            Competition::High => "high",
        }
    }
}

impl std::fmt::Display for Competition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trust tag describing where a record's metrics came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Verified,
    Brand,
    Untagged,
    Estimated,
}

impl Provenance {
    /// Deduplication order, most trusted first.
    pub const PRIORITY_ORDER: [Provenance; 4] = [
        Provenance::Verified,
        Provenance::Brand,
        Provenance::Untagged,
        Provenance::Estimated,
    ];

    /// Rank in [`Self::PRIORITY_ORDER`]; lower wins.
    pub fn rank(&self) -> usize {
        match self {
            Provenance::Verified => 0,
            Provenance::Brand => 1,
            Provenance::Untagged => 2,
            Provenance::Estimated => 3,
        }
    }

    /// Map a collector's source tag onto a provenance.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "verified" | "real" | "wordstream_real" => Provenance::Verified,
            "brand" | "brand_default" => Provenance::Brand,
            "estimated" | "estimate" => Provenance::Estimated,
            _ => Provenance::Untagged,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Verified => "verified",
            Provenance::Brand => "brand",
            Provenance::Untagged => "untagged",
            Provenance::Estimated => "estimated",
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw keyword as delivered by a collector.
///
/// Construction through [`KeywordRecord::new`] guarantees non-negative,
/// finite bids with `cpc_low <= cpc_high`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub term: String,
    pub search_volume: u64,
    pub cpc_low: f64,
    pub cpc_high: f64,
    pub competition: Competition,
    pub provenance: Provenance,
}

impl KeywordRecord {
    /// Negative or non-finite bids become 0.0 and an inverted range is
    /// swapped. Configured default bids are applied by `RecordBuilder`.
    pub fn new(
        term: impl Into<String>,
        search_volume: u64,
        cpc_low: f64,
        cpc_high: f64,
        competition: Competition,
        provenance: Provenance,
    ) -> Self {
        let low = sanitize_bid(cpc_low);
        let high = sanitize_bid(cpc_high);
        let (cpc_low, cpc_high) = if low <= high { (low, high) } else { (high, low) };
        Self {
            term: term.into(),
            search_volume,
            cpc_low,
            cpc_high,
            competition,
            provenance,
        }
    }

    pub fn average_cpc(&self) -> f64 {
        (self.cpc_low + self.cpc_high) / 2.0
    }

    pub fn word_count(&self) -> usize {
        self.term.split_whitespace().count()
    }
}

fn sanitize_bid(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Phrase,
    Broad,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Phrase => "phrase",
            MatchType::Broad => "broad",
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three performance indicators carried by every scored keyword.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeywordMetrics {
    pub average_monthly_searches: u64,
    pub bid_low: f64,
    pub bid_high: f64,
    pub competition_level: Competition,
}

impl KeywordMetrics {
    pub fn average_bid(&self) -> f64 {
        (self.bid_low + self.bid_high) / 2.0
    }
}

impl From<&KeywordRecord> for KeywordMetrics {
    fn from(record: &KeywordRecord) -> Self {
        Self {
            average_monthly_searches: record.search_volume,
            bid_low: record.cpc_low,
            bid_high: record.cpc_high,
            competition_level: record.competition,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredKeyword {
    pub term: String,
    pub metrics: KeywordMetrics,
    /// Composite relevance in [0, 1], comparable only within one run
    pub relevance_score: f64,
    pub suggested_match_type: MatchType,
}

impl ScoredKeyword {
    pub fn word_count(&self) -> usize {
        self.term.split_whitespace().count()
    }
}

/// Coarse intent label that drives budget prioritization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntentCategory {
    Brand,
    Commercial,
    Competitor,
    Category,
    Product,
    Location,
    LongTail,
}

impl IntentCategory {
    pub fn label(&self) -> &'static str {
        match self {
            IntentCategory::Brand => "Brand Terms",
            IntentCategory::Commercial => "Commercial Intent",
            IntentCategory::Competitor => "Competitor Terms",
            IntentCategory::Category => "Category Terms",
            IntentCategory::Product => "Product-specific Terms",
            IntentCategory::Location => "Location-based Queries",
            IntentCategory::LongTail => "Long-Tail Informational Queries",
        }
    }
}

impl std::fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Suggested bid range for an ad group.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CpcRange {
    pub low: f64,
    pub high: f64,
}

impl CpcRange {
    /// Range used when a group has no volume to weight by.
    pub const DEFAULT: CpcRange = CpcRange {
        low: 0.5,
        high: 2.0,
    };

    /// Build a range, clamping to non-negative values and ordering the bounds.
    pub fn new(low: f64, high: f64) -> Self {
        let low = sanitize_bid(low);
        let high = sanitize_bid(high);
        if low <= high {
            Self { low, high }
        } else {
            Self {
                low: high,
                high: low,
            }
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

impl Default for CpcRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdGroup {
    pub name: String,
    pub intent_category: IntentCategory,
    /// Ordered by relevance, descending
    pub keywords: Vec<ScoredKeyword>,
    pub suggested_cpc_range: CpcRange,
    pub theme_description: String,
}

impl AdGroup {
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    pub fn total_volume(&self) -> u64 {
        self.keywords
            .iter()
            .map(|k| k.metrics.average_monthly_searches)
            .sum()
    }

    /// Naive monthly spend: one click per keyword per day at the midpoint bid.
    pub fn estimated_monthly_spend(&self, days_per_month: f64) -> f64 {
        self.suggested_cpc_range.midpoint() * self.keywords.len() as f64 * days_per_month
    }

    pub fn to_record(&self) -> AdGroupRecord {
        AdGroupRecord::from(self)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub name: String,
    /// Ordered by allocation priority
    pub ad_groups: Vec<AdGroup>,
    pub total_budget: f64,
    pub target_conversion_rate: f64,
}

impl Campaign {
    pub fn total_keywords(&self) -> usize {
        self.ad_groups.iter().map(AdGroup::keyword_count).sum()
    }

    /// Keyword-weighted average of the group midpoint bids.
    pub fn average_cpc(&self) -> f64 {
        let (weighted, count) = self.ad_groups.iter().fold((0.0, 0usize), |(w, n), ag| {
            (
                w + ag.suggested_cpc_range.midpoint() * ag.keyword_count() as f64,
                n + ag.keyword_count(),
            )
        });
        if count == 0 {
            0.0
        } else {
            weighted / count as f64
        }
    }

    pub fn estimated_monthly_spend(&self, days_per_month: f64) -> f64 {
        self.ad_groups
            .iter()
            .map(|ag| ag.estimated_monthly_spend(days_per_month))
            .sum()
    }

    pub fn to_record(&self) -> CampaignRecord {
        CampaignRecord::from(self)
    }
}

/// Non-exclusive grouping of top keywords for asset-group guidance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub member_terms: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BidPriority {
    High,
    Medium,
    Low,
}

impl BidPriority {
    pub fn from_roas_score(score: f64) -> Self {
        if score >= 0.8 {
            BidPriority::High
        } else if score >= 0.6 {
            BidPriority::Medium
        } else {
            BidPriority::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BidPriority::High => "HIGH",
            BidPriority::Medium => "MEDIUM",
            BidPriority::Low => "LOW",
        }
    }
}

impl std::fmt::Display for BidPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Product bid suggestion emitted by the shopping bid engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BidSuggestion {
    pub product_hint: String,
    pub suggested_cpc: f64,
    pub cpc_low: f64,
    pub cpc_high: f64,
    pub search_volume: u64,
    pub roas_score: f64,
    pub estimated_monthly_spend: f64,
    pub priority: BidPriority,
}
