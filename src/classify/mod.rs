//! Intent classification into the ad-group taxonomy.
//!
//! Two interchangeable strategies share the [`ClassificationStrategy`]
//! contract. [`IntentClassifier`] picks one at construction time; when the
//! model strategy fails during a run, every remaining keyword of that run is
//! classified by the rules and the model is not consulted again.

pub mod model;
pub mod rules;
pub mod taxonomy;

pub use model::{LabelScore, ModelBasedClassifier, ZeroShotModel};
pub use rules::RuleBasedClassifier;
pub use taxonomy::AdGroupBucket;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::campaign::cpc_range::aggregate_cpc_range;
use crate::config::{ClassificationConfig, VocabularyConfig};
use crate::core::{AdGroup, ScoredKeyword};
use crate::errors::CapabilityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    RuleBased,
    ModelBased,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::RuleBased => "rule-based",
            StrategyKind::ModelBased => "model-based",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait ClassificationStrategy {
    fn kind(&self) -> StrategyKind;

    /// Assign one bucket. Only capability-backed strategies can fail.
    fn classify(&self, keyword: &ScoredKeyword) -> Result<AdGroupBucket, CapabilityError>;
}

/// How a run's groups were produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Strategy selected when the run started
    pub initial_strategy: StrategyKind,
    /// Strategy active when the run finished
    pub final_strategy: StrategyKind,
    pub fallback_reason: Option<String>,
    /// Keywords assigned by the model before any fallback
    pub model_classified: usize,
}

impl ClassificationReport {
    pub fn fell_back(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Keywords with their assigned buckets, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub assignments: Vec<(ScoredKeyword, AdGroupBucket)>,
    pub report: ClassificationReport,
}

#[derive(Debug)]
pub struct IntentClassifier {
    rules: RuleBasedClassifier,
    model: Option<ModelBasedClassifier>,
    init_failure: Option<String>,
    config: ClassificationConfig,
}

impl IntentClassifier {
    pub fn rule_based(vocabulary: &VocabularyConfig, config: &ClassificationConfig) -> Self {
        Self {
            rules: RuleBasedClassifier::new(vocabulary, config),
            model: None,
            init_failure: None,
            config: config.clone(),
        }
    }

    pub fn with_model(
        vocabulary: &VocabularyConfig,
        config: &ClassificationConfig,
        model: Box<dyn ZeroShotModel>,
    ) -> Self {
        Self {
            model: Some(ModelBasedClassifier::new(model, vocabulary)),
            ..Self::rule_based(vocabulary, config)
        }
    }

    /// Initialize the model through `loader`. A loader failure selects the
    /// rule-based strategy and is reported as the fallback reason.
    pub fn with_model_loader<F>(
        vocabulary: &VocabularyConfig,
        config: &ClassificationConfig,
        loader: F,
    ) -> Self
    where
        F: FnOnce() -> Result<Box<dyn ZeroShotModel>, CapabilityError>,
    {
        match loader() {
            Ok(model) => Self::with_model(vocabulary, config, model),
            Err(e) => {
                tracing::warn!("Classifier model unavailable, using rule-based strategy: {}", e);
                Self {
                    init_failure: Some(e.to_string()),
                    ..Self::rule_based(vocabulary, config)
                }
            }
        }
    }

    fn initial_strategy(&self) -> StrategyKind {
        if self.model.is_some() || self.init_failure.is_some() {
            StrategyKind::ModelBased
        } else {
            StrategyKind::RuleBased
        }
    }

    /// Assign a bucket to every keyword.
    pub fn classify(&self, keywords: Vec<ScoredKeyword>) -> Classification {
        let mut active: &dyn ClassificationStrategy = match &self.model {
            Some(model) => model,
            None => &self.rules,
        };
        let mut fallback_reason = self.init_failure.clone();
        let mut model_classified = 0;

        let assignments = keywords
            .into_iter()
            .map(|keyword| {
                let bucket = match active.classify(&keyword) {
                    Ok(bucket) => {
                        if active.kind() == StrategyKind::ModelBased {
                            model_classified += 1;
                        }
                        bucket
                    }
                    Err(e) => {
                        tracing::warn!(
                            classified = model_classified,
                            "Classifier model failed, falling back to rules for this run: {}",
                            e
                        );
                        fallback_reason = Some(e.to_string());
                        active = &self.rules;
                        self.rules.bucket_for(&keyword)
                    }
                };
                (keyword, bucket)
            })
            .collect();

        let final_strategy = if fallback_reason.is_some() {
            StrategyKind::RuleBased
        } else {
            active.kind()
        };

        Classification {
            assignments,
            report: ClassificationReport {
                initial_strategy: self.initial_strategy(),
                final_strategy,
                fallback_reason,
                model_classified,
            },
        }
    }

    /// Classify and collect into ad groups.
    ///
    /// Groups follow taxonomy order, empty buckets are dropped, keywords are
    /// stably sorted by relevance (descending) and the result is capped at
    /// `max_ad_groups`.
    pub fn build_ad_groups(
        &self,
        keywords: Vec<ScoredKeyword>,
    ) -> (Vec<AdGroup>, ClassificationReport) {
        let Classification {
            assignments,
            report,
        } = self.classify(keywords);

        // BTreeMap iterates buckets in taxonomy order
        let mut buckets: BTreeMap<AdGroupBucket, Vec<ScoredKeyword>> = BTreeMap::new();
        for (keyword, bucket) in assignments {
            buckets.entry(bucket).or_default().push(keyword);
        }

        let groups: Vec<AdGroup> = buckets
            .into_iter()
            .map(|(bucket, mut keywords)| {
                keywords.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
                AdGroup {
                    name: bucket.label().to_string(),
                    intent_category: bucket.intent_category(),
                    suggested_cpc_range: aggregate_cpc_range(&keywords),
                    keywords,
                    theme_description: bucket.description().to_string(),
                }
            })
            .take(self.config.max_ad_groups)
            .collect();

        tracing::info!(
            groups = groups.len(),
            strategy = %report.final_strategy,
            "Built ad groups"
        );
        (groups, report)
    }
}
