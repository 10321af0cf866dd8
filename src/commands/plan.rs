use crate::cli;
use crate::config::{self, PlannerConfig};
use crate::io::{self, output};
use crate::pipeline::{CampaignPlan, CampaignPlanner};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct PlanConfig {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub search_budget: Option<f64>,
    pub shopping_budget: Option<f64>,
    pub format: cli::OutputFormat,
    pub output: Option<PathBuf>,
}

/// Load config and keywords, run the planner, and write the result.
pub fn handle_plan(plan_config: PlanConfig) -> Result<()> {
    let planner_config = load_planner_config(&plan_config)?;
    let plan = run_plan(&plan_config, &planner_config)?;
    write_plan(&plan, plan_config.format, plan_config.output.as_ref())
}

fn load_planner_config(plan_config: &PlanConfig) -> Result<PlannerConfig> {
    let mut planner_config = config::resolve_config(plan_config.config.as_deref())?;
    apply_budget_overrides(
        &mut planner_config,
        plan_config.search_budget,
        plan_config.shopping_budget,
    );
    planner_config
        .validate()
        .context("invalid configuration after applying command line overrides")?;
    Ok(planner_config)
}

fn apply_budget_overrides(
    config: &mut PlannerConfig,
    search_budget: Option<f64>,
    shopping_budget: Option<f64>,
) {
    if let Some(budget) = search_budget {
        config.search.budget = budget;
    }
    if let Some(budget) = shopping_budget {
        config.shopping.budget = budget;
    }
}

fn run_plan(plan_config: &PlanConfig, planner_config: &PlannerConfig) -> Result<CampaignPlan> {
    let raw = io::load_keywords(&plan_config.input)?;
    tracing::info!(
        records = raw.len(),
        input = %plan_config.input.display(),
        "Loaded keyword records"
    );

    let planner = CampaignPlanner::new(planner_config)?;
    Ok(planner.plan(&raw))
}

fn write_plan(
    plan: &CampaignPlan,
    format: cli::OutputFormat,
    output_file: Option<&PathBuf>,
) -> Result<()> {
    let sink: Box<dyn std::io::Write> = match output_file {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };

    let mut writer = output::create_writer(format.into(), sink);
    writer.write_plan(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_budget_overrides_replace_config_values() {
        let mut config = PlannerConfig::default();
        apply_budget_overrides(&mut config, Some(0.0), None);
        assert_eq!(config.search.budget, 0.0);
        assert_eq!(
            config.shopping.budget,
            PlannerConfig::default().shopping.budget
        );
    }

    #[test]
    fn test_handle_plan_writes_json_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("keywords.yaml");
        std::fs::write(
            &input,
            indoc! {"
                - keyword: business intelligence platform
                  search_volume: 5000
                  cpc_low: 1.0
                  cpc_high: 4.0
                  competition: medium
                  provenance: verified
            "},
        )
        .unwrap();
        let output_path = dir.path().join("plan.json");

        handle_plan(PlanConfig {
            input,
            config: None,
            search_budget: Some(5000.0),
            shopping_budget: None,
            format: cli::OutputFormat::Json,
            output: Some(output_path.clone()),
        })
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output_path).unwrap()).unwrap();
        assert_eq!(json["stats"]["qualified"], 1);
        assert!(json["search_campaign"]["ad_groups"].is_array());
    }

    #[test]
    fn test_missing_input_is_reported() {
        let dir = TempDir::new().unwrap();
        let result = handle_plan(PlanConfig {
            input: dir.path().join("absent.json"),
            config: None,
            search_budget: None,
            shopping_budget: None,
            format: cli::OutputFormat::Json,
            output: Some(dir.path().join("out.json")),
        });
        assert!(result.is_err());
    }
}
