//! End-to-end planning run.
//!
//! Stages run in a fixed order and each one consumes the previous stage's
//! output without mutating it:
//!
//! 1. raw input → keyword records (defaults, estimation)
//! 2. dedup and provenance volume thresholds
//! 3. relevance scoring
//! 4. intent classification into ad groups (with CPC ranges)
//! 5. budget allocation into the search campaign
//! 6. shopping bid suggestions from all scored keywords
//! 7. asset-group themes from all scored keywords

pub mod data;

pub use data::{CampaignPlan, PlanExport, RunStats};

use tracing::{debug, info, info_span};

use crate::campaign::SearchCampaignBuilder;
use crate::classify::IntentClassifier;
use crate::config::PlannerConfig;
use crate::core::{KeywordRecord, RawKeyword, RecordBuilder};
use crate::errors::Result;
use crate::keywords::Deduplicator;
use crate::pmax::ThemeExtractor;
use crate::scoring::RelevanceScorer;
use crate::shopping::RoasBidEngine;

#[derive(Debug)]
pub struct CampaignPlanner {
    records: RecordBuilder,
    dedup: Deduplicator,
    scorer: RelevanceScorer,
    classifier: IntentClassifier,
    campaign: SearchCampaignBuilder,
    bids: RoasBidEngine,
    themes: ThemeExtractor,
}

impl CampaignPlanner {
    /// Planner with the rule-based classifier.
    pub fn new(config: &PlannerConfig) -> Result<Self> {
        let classifier = IntentClassifier::rule_based(&config.vocabulary, &config.classification);
        Self::with_classifier(config, classifier)
    }

    pub fn with_classifier(config: &PlannerConfig, classifier: IntentClassifier) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            records: RecordBuilder::new(config.input.clone()),
            dedup: Deduplicator::new(config.filtering.clone()),
            scorer: RelevanceScorer::new(&config.scoring, &config.vocabulary)?,
            classifier,
            campaign: SearchCampaignBuilder::new(&config.search, &config.conversion),
            bids: RoasBidEngine::new(&config.shopping, &config.conversion, &config.vocabulary)?,
            themes: ThemeExtractor::new(&config.pmax),
        })
    }

    /// Run every stage on raw collector records.
    pub fn plan(&self, raw: &[RawKeyword]) -> CampaignPlan {
        let span = info_span!("plan", raw_records = raw.len());
        let _enter = span.enter();

        let records = self.records.build_all(raw);
        debug!(
            usable = records.len(),
            skipped = raw.len() - records.len(),
            "Built keyword records"
        );

        let mut plan = self.plan_records(&records);
        plan.stats.raw_records = raw.len();
        plan
    }

    /// Run stages 2 to 7 on already-built records.
    pub fn plan_records(&self, records: &[KeywordRecord]) -> CampaignPlan {
        let unique = {
            let _span = info_span!("dedup").entered();
            self.dedup.deduplicate(records)
        };
        let deduplicated = unique.len();
        let qualified = self.dedup.filter_by_volume(unique);

        let scored = {
            let _span = info_span!("scoring").entered();
            self.scorer.score_batch(&qualified)
        };

        let (ad_groups, classification) = {
            let _span = info_span!("classification").entered();
            self.classifier.build_ad_groups(scored.clone())
        };

        let (campaign, allocation) = {
            let _span = info_span!("allocation").entered();
            self.campaign.build(ad_groups)
        };

        let bid_suggestions = {
            let _span = info_span!("shopping_bids").entered();
            self.bids.suggest_bids(&scored)
        };

        let themes = {
            let _span = info_span!("pmax_themes").entered();
            self.themes.extract(&scored)
        };

        let stats = RunStats {
            raw_records: records.len(),
            usable_records: records.len(),
            deduplicated,
            qualified: qualified.len(),
            scored: scored.len(),
            allocated_keywords: campaign.total_keywords(),
        };

        info!(
            qualified = stats.qualified,
            ad_groups = campaign.ad_groups.len(),
            keywords = stats.allocated_keywords,
            themes = themes.len(),
            bids = bid_suggestions.len(),
            "Planning run complete"
        );

        CampaignPlan {
            campaign,
            allocation,
            classification,
            themes,
            bid_suggestions,
            stats,
        }
    }
}
