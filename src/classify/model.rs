use serde::{Deserialize, Serialize};

use super::{AdGroupBucket, ClassificationStrategy, StrategyKind};
use crate::config::VocabularyConfig;
use crate::core::ScoredKeyword;
use crate::errors::CapabilityError;
use crate::scoring::vocabulary::{tokenize, TermMatcher};

/// One label with the confidence a model assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Zero-shot text classification capability supplied by a collaborator.
///
/// Implementations own any retry or timeout policy. Every error returned
/// here ends model use for the rest of the run.
pub trait ZeroShotModel {
    fn rank(&self, text: &str, labels: &[&str]) -> Result<Vec<LabelScore>, CapabilityError>;
}

/// Model-backed strategy with hard brand and competitor overrides.
pub struct ModelBasedClassifier {
    model: Box<dyn ZeroShotModel>,
    brand: TermMatcher,
    competitor: TermMatcher,
    labels: Vec<&'static str>,
}

impl std::fmt::Debug for ModelBasedClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBasedClassifier")
            .field("labels", &self.labels.len())
            .finish_non_exhaustive()
    }
}

impl ModelBasedClassifier {
    pub fn new(model: Box<dyn ZeroShotModel>, vocabulary: &VocabularyConfig) -> Self {
        Self {
            model,
            brand: TermMatcher::new(&vocabulary.brand_terms),
            competitor: TermMatcher::new(&vocabulary.competitor_terms),
            labels: AdGroupBucket::candidate_labels(),
        }
    }

    fn override_for(&self, term: &str) -> Option<AdGroupBucket> {
        let tokens = tokenize(term);
        if self.brand.matches(&tokens) {
            Some(AdGroupBucket::Brand)
        } else if self.competitor.matches(&tokens) {
            Some(AdGroupBucket::Competitor)
        } else {
            None
        }
    }

    /// True when the keyword is settled by an override and the model is not consulted.
    pub fn is_overridden(&self, keyword: &ScoredKeyword) -> bool {
        self.override_for(&keyword.term).is_some()
    }
}

/// Highest-scoring label; ties go to the earlier entry.
fn top_label(ranked: &[LabelScore]) -> Option<&LabelScore> {
    ranked.iter().fold(None, |best: Option<&LabelScore>, candidate| match best {
        Some(b) if b.score >= candidate.score => Some(b),
        _ => Some(candidate),
    })
}

impl ClassificationStrategy for ModelBasedClassifier {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ModelBased
    }

    fn classify(&self, keyword: &ScoredKeyword) -> Result<AdGroupBucket, CapabilityError> {
        if let Some(bucket) = self.override_for(&keyword.term) {
            return Ok(bucket);
        }

        let ranked = self.model.rank(&keyword.term, &self.labels)?;
        let top = top_label(&ranked).ok_or_else(|| {
            CapabilityError::InvalidResponse(format!("no labels returned for '{}'", keyword.term))
        })?;

        AdGroupBucket::from_label(&top.label).ok_or_else(|| {
            CapabilityError::InvalidResponse(format!("unknown label '{}'", top.label))
        })
    }
}
