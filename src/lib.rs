//! Campaign planning for keyword research output.
//!
//! Collected keyword records flow through deduplication, relevance scoring,
//! intent classification, and budget allocation into a search campaign.
//! Shopping bid suggestions and Performance Max asset-group themes are
//! derived from the same scored keywords. See [`CampaignPlanner`].

// Export modules for library usage
pub mod campaign;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod keywords;
pub mod pipeline;
pub mod pmax;
pub mod scoring;
pub mod shopping;

// Re-export commonly used types
pub use crate::core::{
    AdGroup, BidPriority, BidSuggestion, Campaign, Competition, CpcRange, IntentCategory,
    KeywordMetrics, KeywordRecord, MatchType, Provenance, RawKeyword, ScoredKeyword, Theme,
};

pub use crate::classify::{
    AdGroupBucket, ClassificationReport, IntentClassifier, StrategyKind, ZeroShotModel,
};

pub use crate::config::PlannerConfig;
pub use crate::errors::{CapabilityError, Error, Result};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::pipeline::{CampaignPlan, CampaignPlanner, PlanExport, RunStats};
