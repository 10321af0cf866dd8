pub mod output;

pub use output::{create_writer, OutputFormat, OutputWriter};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::RawKeyword;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Parse collector records from JSON, or from YAML when the file extension
/// says so.
pub fn parse_keywords(path: &Path, contents: &str) -> Result<Vec<RawKeyword>> {
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let records = if is_yaml {
        serde_yaml::from_str(contents)
            .with_context(|| format!("invalid YAML keyword list in {}", path.display()))?
    } else {
        serde_json::from_str(contents)
            .with_context(|| format!("invalid JSON keyword list in {}", path.display()))?
    };
    Ok(records)
}

pub fn load_keywords(path: &Path) -> Result<Vec<RawKeyword>> {
    let contents = read_file(path)?;
    parse_keywords(path, &contents)
}
