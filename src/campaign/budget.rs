//! Budget-constrained ad-group allocation.
//!
//! Spend model: one click per keyword per day at the midpoint of the group's
//! CPC range. When the whole set fits, groups pass through untouched.
//! Otherwise groups are ranked by ROAS potential and accepted greedily; the
//! first group that overflows is truncated to the keywords that still fit and
//! allocation stops there.

use serde::{Deserialize, Serialize};

use crate::core::{AdGroup, IntentCategory};

/// Suffix marking a group that was cut down to fit the budget
pub const OPTIMIZED_SUFFIX: &str = " (Optimized)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub budget: f64,
    /// False when every group fit without prioritization
    pub budget_binding: bool,
    pub accepted_groups: usize,
    /// Name of the truncated group, if any
    pub truncated_group: Option<String>,
    pub dropped_groups: usize,
    pub estimated_spend: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub groups: Vec<AdGroup>,
    pub summary: AllocationSummary,
}

fn intent_weight(category: IntentCategory) -> f64 {
    match category {
        IntentCategory::Brand => 0.4,
        IntentCategory::Commercial | IntentCategory::Competitor => 0.35,
        IntentCategory::Category | IntentCategory::Product => 0.3,
        IntentCategory::Location => 0.25,
        IntentCategory::LongTail => 0.15,
    }
}

fn volume_weight(total_volume: u64) -> f64 {
    match total_volume {
        v if v >= 100_000 => 0.3,
        v if v >= 50_000 => 0.25,
        v if v >= 10_000 => 0.2,
        _ => 0.1,
    }
}

fn cpc_weight(average_cpc: f64) -> f64 {
    if average_cpc <= 1.0 {
        0.2
    } else if average_cpc <= 2.0 {
        0.15
    } else if average_cpc <= 4.0 {
        0.1
    } else {
        0.05
    }
}

fn diversification_weight(keyword_count: usize) -> f64 {
    match keyword_count {
        n if n >= 20 => 0.1,
        n if n >= 10 => 0.08,
        n if n >= 5 => 0.05,
        _ => 0.02,
    }
}

/// Heuristic return-on-ad-spend potential of a group, in [0, 1].
pub fn roas_potential(group: &AdGroup) -> f64 {
    let score = intent_weight(group.intent_category)
        + volume_weight(group.total_volume())
        + cpc_weight(group.suggested_cpc_range.midpoint())
        + diversification_weight(group.keyword_count());
    score.min(1.0)
}

/// Copy of `group` keeping its `n` most relevant keywords and its CPC range.
fn truncate_group(group: &AdGroup, n: usize) -> AdGroup {
    let mut keywords = group.keywords.clone();
    keywords.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    keywords.truncate(n);

    AdGroup {
        name: format!("{}{}", group.name, OPTIMIZED_SUFFIX),
        intent_category: group.intent_category,
        keywords,
        suggested_cpc_range: group.suggested_cpc_range,
        theme_description: group.theme_description.clone(),
    }
}

#[derive(Debug, Clone)]
pub struct BudgetAllocator {
    days_per_month: f64,
}

impl Default for BudgetAllocator {
    fn default() -> Self {
        Self {
            days_per_month: 30.0,
        }
    }
}

impl BudgetAllocator {
    pub fn new(days_per_month: f64) -> Self {
        Self { days_per_month }
    }

    pub fn estimated_spend(&self, group: &AdGroup) -> f64 {
        group.estimated_monthly_spend(self.days_per_month)
    }

    pub fn total_spend(&self, groups: &[AdGroup]) -> f64 {
        groups.iter().map(|g| self.estimated_spend(g)).sum()
    }

    pub fn allocate(&self, groups: Vec<AdGroup>, budget: f64) -> Allocation {
        let group_count = groups.len();

        if budget.is_nan() || budget <= 0.0 {
            tracing::info!(budget, "No search budget, emitting no ad groups");
            return Allocation {
                groups: Vec::new(),
                summary: AllocationSummary {
                    budget,
                    budget_binding: true,
                    accepted_groups: 0,
                    truncated_group: None,
                    dropped_groups: group_count,
                    estimated_spend: 0.0,
                },
            };
        }

        let total = self.total_spend(&groups);
        if total <= budget {
            tracing::debug!(total, budget, "Budget not binding, keeping all ad groups");
            return Allocation {
                summary: AllocationSummary {
                    budget,
                    budget_binding: false,
                    accepted_groups: group_count,
                    truncated_group: None,
                    dropped_groups: 0,
                    estimated_spend: total,
                },
                groups,
            };
        }

        let mut ranked: Vec<(f64, AdGroup)> =
            groups.into_iter().map(|g| (roas_potential(&g), g)).collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut accepted = Vec::new();
        let mut running = 0.0;
        let mut truncated_group = None;

        for (score, group) in &ranked {
            let spend = self.estimated_spend(group);
            if running + spend <= budget {
                tracing::debug!(group = %group.name, score, spend, "Accepted ad group");
                running += spend;
                accepted.push(group.clone());
                continue;
            }

            if let Some(truncated) = self.fit_remaining(group, running, budget) {
                tracing::info!(
                    group = %group.name,
                    kept = truncated.keyword_count(),
                    of = group.keyword_count(),
                    "Truncated ad group to fit budget"
                );
                running += self.estimated_spend(&truncated);
                truncated_group = Some(truncated.name.clone());
                accepted.push(truncated);
            }
            break;
        }

        let summary = AllocationSummary {
            budget,
            budget_binding: true,
            accepted_groups: accepted.len(),
            truncated_group,
            dropped_groups: group_count - accepted.len(),
            estimated_spend: running,
        };
        tracing::info!(
            accepted = summary.accepted_groups,
            dropped = summary.dropped_groups,
            spend = running,
            budget,
            "Allocated search budget"
        );

        Allocation {
            groups: accepted,
            summary,
        }
    }

    /// Largest prefix of `group` whose spend fits in what is left of `budget`.
    fn fit_remaining(&self, group: &AdGroup, running: f64, budget: f64) -> Option<AdGroup> {
        let per_keyword = group.suggested_cpc_range.midpoint() * self.days_per_month;
        if per_keyword.is_nan() || per_keyword <= 0.0 {
            return None;
        }

        let mut n = (((budget - running) / per_keyword).floor().max(0.0) as usize)
            .min(group.keyword_count());
        // guard against the division rounding one keyword too high
        while n > 0 && running + self.estimated_spend(&truncate_group(group, n)) > budget {
            n -= 1;
        }

        (n > 0).then(|| truncate_group(group, n))
    }
}
