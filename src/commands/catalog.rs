use anyhow::Result;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Table};
use std::io::Write;

use crate::catalog::CATALOG;
use crate::io::OutputFormat;

pub fn show_catalog(format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    write_catalog(format, &mut stdout.lock())
}

pub fn write_catalog<W: Write>(format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&CATALOG)?)?;
        }
        OutputFormat::Markdown => {
            writeln!(out, "# Biomarker Catalog")?;
            writeln!(out)?;
            writeln!(out, "| Symbol | Name | Category | Unit | Normal Range |")?;
            writeln!(out, "|--------|------|----------|------|--------------|")?;
            for [symbol, name, category, unit, range] in rows() {
                writeln!(
                    out,
                    "| `{}` | {} | {} | {} | {} |",
                    symbol, name, category, unit, range
                )?;
            }
        }
        OutputFormat::Terminal => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_header(vec!["Symbol", "Name", "Category", "Unit", "Normal Range"]);
            for row in rows() {
                table.add_row(row.to_vec());
            }
            writeln!(out, "{}", "Biomarker Catalog".bold().blue())?;
            writeln!(out, "{table}")?;
        }
    }
    Ok(())
}

fn rows() -> impl Iterator<Item = [String; 5]> {
    CATALOG.iter().map(|entry| {
        [
            entry.marker.symbol().to_string(),
            entry.name.to_string(),
            entry.category.to_string(),
            entry.unit.to_string(),
            entry
                .range
                .map(|range| range.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        write_catalog(format, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_markdown_catalog_lists_every_marker() {
        let out = render(OutputFormat::Markdown);
        assert_eq!(out.lines().filter(|l| l.starts_with("| `")).count(), CATALOG.len());
        assert!(out.contains("| `hdl` | HDL Cholesterol | Lipid | mg/dL | >= 40 |"));
        assert!(out.contains("| `height` | Height | Body | cm | - |"));
    }

    #[test]
    fn test_json_catalog_includes_markers_and_ranges() {
        let json: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), CATALOG.len());
        assert_eq!(entries[0]["marker"], "glucose_fasting");
        assert_eq!(entries[0]["range"]["max"], 100.0);
    }
}
