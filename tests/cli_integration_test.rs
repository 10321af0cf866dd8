//! Integration tests for the `semplan` binary.

use assert_cmd::Command;
use indoc::indoc;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const KEYWORDS_JSON: &str = indoc! {r#"
    [
      {"keyword": "cubehq", "search_volume": 1000, "cpc_low": 0.5, "cpc_high": 1.5,
       "competition": "low", "provenance": "brand"},
      {"keyword": "business intelligence platform", "search_volume": "5,000",
       "cpc_low": 2.0, "cpc_high": 6.0, "competition": "medium", "provenance": "verified"},
      {"keyword": "buy bi software near me", "search_volume": 800,
       "cpc_low": 1.0, "cpc_high": 3.0, "competition": "high", "provenance": "verified"},
      {"keyword": "   "}
    ]
"#};

fn semplan(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("semplan").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_plan_json_output() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("keywords.json"), KEYWORDS_JSON).unwrap();

    let output = semplan(&dir)
        .args(["plan", "--input", "keywords.json", "--format", "json"])
        .output()
        .unwrap();

    if !output.status.success() {
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("semplan plan failed");
    }

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON");
    assert_eq!(json["stats"]["raw_records"], 4);
    assert_eq!(json["stats"]["usable_records"], 3);
    assert_eq!(json["search_campaign"]["total_ad_groups"], 3);
    assert_eq!(
        json["search_campaign"]["ad_groups"][0]["name"],
        "Brand Terms"
    );
    assert_eq!(json["classification"]["final_strategy"], "rule-based");
}

#[test]
fn test_plan_budget_override_to_zero() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("keywords.json"), KEYWORDS_JSON).unwrap();

    let output = semplan(&dir)
        .args([
            "plan",
            "-i",
            "keywords.json",
            "-f",
            "json",
            "--search-budget",
            "0",
            "--shopping-budget",
            "0",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["search_campaign"]["total_ad_groups"], 0);
    assert_eq!(json["shopping_bids"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_plan_markdown_to_file_uses_discovered_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("keywords.json"), KEYWORDS_JSON).unwrap();
    fs::write(
        dir.path().join("semplan.toml"),
        indoc! {r#"
            [search]
            campaign_name = "Acme Search"
        "#},
    )
    .unwrap();

    semplan(&dir)
        .args(["plan", "-i", "keywords.json", "-f", "markdown", "-o", "plan.md"])
        .assert()
        .success();

    let markdown = fs::read_to_string(dir.path().join("plan.md")).unwrap();
    assert!(markdown.starts_with("# Acme Search"));
    assert!(markdown.contains("Core Business Intelligence"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("keywords.json"), KEYWORDS_JSON).unwrap();
    fs::write(
        dir.path().join("bad.toml"),
        "[scoring.weights]\nvolume = -1.0\n",
    )
    .unwrap();

    let output = semplan(&dir)
        .args(["plan", "-i", "keywords.json", "--config", "bad.toml"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("volume"));
}

#[test]
fn test_init_creates_config_once() {
    let dir = TempDir::new().unwrap();

    semplan(&dir).arg("init").assert().success();
    assert!(dir.path().join("semplan.toml").is_file());

    semplan(&dir).arg("init").assert().failure();
    semplan(&dir).args(["init", "--force"]).assert().success();
}
