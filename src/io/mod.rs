pub mod insights;
pub mod output;

pub use insights::report_insights;
pub use output::{create_writer, OutputFormat, OutputWriter, ReportContext};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::RawReadings;

pub fn read_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

/// Read a flat `symbol = value` readings file. `.toml` files are parsed as
/// TOML, everything else as JSON.
pub fn read_readings(path: &Path) -> Result<RawReadings> {
    let content = read_file(path)
        .with_context(|| format!("Failed to read readings file {}", path.display()))?;
    parse_readings(&content, is_toml(path))
        .with_context(|| format!("Failed to parse readings file {}", path.display()))
}

pub fn parse_readings(content: &str, toml_syntax: bool) -> Result<RawReadings> {
    let readings = if toml_syntax {
        toml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };
    Ok(readings)
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}
