use serde::{Deserialize, Serialize};

use super::budgets::{budget_violations, ConversionConfig, PmaxConfig, SearchConfig, ShoppingConfig};
use super::scoring::ScoringConfig;
use super::thresholds::{ClassificationConfig, FilteringConfig, InputConfig};
use super::vocabulary::VocabularyConfig;
use crate::errors::{Error, Result};

/// Root configuration structure for semplan
///
/// Every section is optional in the TOML file; missing sections and fields
/// take their documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlannerConfig {
    /// Defaults for fields collectors leave out
    #[serde(default)]
    pub input: InputConfig,

    /// Per-provenance volume thresholds
    #[serde(default)]
    pub filtering: FilteringConfig,

    /// Relevance scoring weights and bonuses
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Domain vocabularies
    #[serde(default)]
    pub vocabulary: VocabularyConfig,

    /// Intent classification thresholds
    #[serde(default)]
    pub classification: ClassificationConfig,

    #[serde(default)]
    pub conversion: ConversionConfig,

    /// Search campaign budget and naming
    #[serde(default)]
    pub search: SearchConfig,

    /// Shopping bid engine settings
    #[serde(default)]
    pub shopping: ShoppingConfig,

    /// Performance-max theme extraction settings
    #[serde(default)]
    pub pmax: PmaxConfig,
}

impl PlannerConfig {
    /// Collect ALL configuration violations.
    pub fn violations(&self) -> Vec<String> {
        let mut errors = self.input.violations();
        errors.extend(self.scoring.violations());
        errors.extend(self.classification.violations());
        errors.extend(budget_violations(
            &self.conversion,
            &self.search,
            &self.shopping,
        ));
        errors
    }

    pub fn validate(&self) -> Result<()> {
        let errors = self.violations();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::from_violations(&errors))
        }
    }
}
