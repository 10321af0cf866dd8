use std::fs;
use std::path::{Path, PathBuf};

use super::core::PlannerConfig;
use crate::errors::{Error, Result};

/// File name searched for when no explicit config path is given
pub const CONFIG_FILE_NAME: &str = "semplan.toml";

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<PlannerConfig> {
    let config = toml::from_str::<PlannerConfig>(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate configuration from an explicit path
pub fn load_config(path: &Path) -> Result<PlannerConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        Error::configuration(format!("failed to read {}: {}", path.display(), e))
    })?;
    let config = parse_and_validate_config(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find `semplan.toml` in `start` or one of its ancestors.
pub fn find_config_file(start: PathBuf) -> Option<PathBuf> {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Load the explicit config, or the nearest `semplan.toml`, or defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<PlannerConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let discovered = std::env::current_dir()
        .ok()
        .and_then(find_config_file);

    match discovered {
        Some(path) => load_config(&path),
        None => {
            tracing::debug!("No {} found. Using default config.", CONFIG_FILE_NAME);
            Ok(PlannerConfig::default())
        }
    }
}

/// Commented default configuration written by `semplan init`
pub const DEFAULT_CONFIG_TOML: &str = r#"# semplan configuration

[input]
default_cpc_low = 0.5
default_cpc_high = 2.0
estimate_missing_volume = true

[filtering]
verified_min_volume = 100
brand_min_volume = 100
untagged_min_volume = 500
estimated_min_volume = 1000

[scoring.weights]
volume = 0.3
competition = 0.2
cpc_efficiency = 0.2
domain = 0.3

[vocabulary]
brand_terms = ["cubehq", "cube hq", "cube"]
competitor_terms = ["reputation", "birdeye", "podium", "vs", "compare", "alternative", "competitor"]

[classification]
long_tail_min_words = 4
long_tail_max_volume = 1000
fallback_core_min_volume = 2000
max_ad_groups = 15

[conversion]
target_rate = 0.02

[search]
campaign_name = "SEM Campaign - Search"
budget = 2500.0
days_per_month = 30.0

[shopping]
budget = 1000.0
# target_cpa = 50.0
click_through_rate = 0.01
budget_utilization = 0.9
max_candidates = 30

[pmax]
top_n = 50
max_terms_per_theme = 15
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_toml_round_trips_to_defaults() {
        let config = parse_and_validate_config(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = parse_and_validate_config(indoc! {r#"
            [search]
            budget = 900.0

            [vocabulary]
            brand_terms = ["acme"]
        "#})
        .unwrap();
        assert_eq!(config.search.budget, 900.0);
        assert_eq!(config.search.days_per_month, 30.0);
        assert_eq!(config.vocabulary.brand_terms, vec!["acme".to_string()]);
        assert_eq!(config.filtering.untagged_min_volume, 500);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let result = parse_and_validate_config(indoc! {r#"
            [scoring.weights]
            volume = -0.3
        "#});
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = parse_and_validate_config("[search\nbudget = ");
        assert!(matches!(result, Err(Error::TomlParse(_))));
    }

    #[test]
    fn test_find_config_file_in_ancestor() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        let mut file = std::fs::File::create(temp.path().join(CONFIG_FILE_NAME)).unwrap();
        writeln!(file, "[search]\nbudget = 10.0").unwrap();

        let found = find_config_file(nested).unwrap();
        assert_eq!(found, temp.path().join(CONFIG_FILE_NAME));
        assert_eq!(load_config(&found).unwrap().search.budget, 10.0);
    }

    #[test]
    fn test_directory_ancestors_respects_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c"), PathBuf::from("/a/b")]);
    }
}
