// Sub-modules
mod budgets;
mod core;
mod loader;
mod scoring;
mod thresholds;
mod vocabulary;

// Re-export scoring types
pub use scoring::{
    default_competition_weight, default_cpc_efficiency_weight, default_domain_weight,
    default_volume_weight, DomainBonuses, MatchTypeThresholds, ScoringConfig, ScoringWeights,
};

// Re-export threshold types
pub use thresholds::{ClassificationConfig, FilteringConfig, InputConfig};

// Re-export vocabulary types
pub use vocabulary::{RelevanceVocabulary, VocabularyConfig};

// Re-export budget types
pub use budgets::{ConversionConfig, PmaxConfig, SearchConfig, ShoppingConfig};

// Re-export core types
pub use self::core::PlannerConfig;

pub use loader::{
    directory_ancestors, find_config_file, load_config, parse_and_validate_config,
    resolve_config, CONFIG_FILE_NAME, DEFAULT_CONFIG_TOML,
};
