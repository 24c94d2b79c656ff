use chrono::{DateTime, Utc};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::{Deserialize, Serialize};
use std::io::Write;

use super::insights::report_insights;
use crate::catalog;
use crate::core::{RawReadings, RawValue, ScreeningInput};
use crate::risk::{RiskLevel, RiskReport};
use crate::screening::Screening;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// Everything a writer needs to render one scored screening.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub label: &'a str,
    pub input: &'a ScreeningInput,
    pub report: &'a RiskReport,
    pub generated_at: DateTime<Utc>,
}

impl<'a> ReportContext<'a> {
    /// `None` until the screening has been scored.
    pub fn from_screening(screening: &'a Screening) -> Option<Self> {
        screening.report().map(|report| Self {
            label: screening.label(),
            input: screening.input(),
            report,
            generated_at: screening.updated_at(),
        })
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, context: &ReportContext<'_>) -> anyhow::Result<()>;
}

pub fn create_writer<'w, W: Write + 'w>(
    format: OutputFormat,
    writer: W,
) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

struct ReadingRow {
    cells: [String; 5],
    abnormal: bool,
}

fn reading_rows(input: &ScreeningInput) -> Vec<ReadingRow> {
    input
        .present()
        .map(|(marker, value)| {
            let entry = catalog::lookup(marker);
            let range = entry
                .range
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string());
            let status = catalog::classify(marker, value);
            ReadingRow {
                cells: [
                    entry.name.to_string(),
                    value.to_string(),
                    entry.unit.to_string(),
                    range,
                    status.map_or_else(|| "-".to_string(), |s| s.to_string()),
                ],
                abnormal: status.is_some_and(|s| s.is_abnormal()),
            }
        })
        .collect()
}

fn lifestyle_lines(input: &ScreeningInput) -> Vec<String> {
    input
        .to_raw()
        .into_iter()
        .filter_map(|(key, value)| match value {
            RawValue::Text(label) => Some(format!("{}: {}", key.replace('_', " "), label)),
            _ => None,
        })
        .collect()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    screening: &'a str,
    generated_at: DateTime<Utc>,
    readings: RawReadings,
    insights: Vec<String>,
    #[serde(flatten)]
    report: &'a RiskReport,
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, context: &ReportContext<'_>) -> anyhow::Result<()> {
        let document = JsonReport {
            screening: context.label,
            generated_at: context.generated_at,
            readings: context.input.to_raw(),
            insights: report_insights(context.report),
            report: context.report,
        };
        let json = serde_json::to_string_pretty(&document)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, context: &ReportContext<'_>) -> anyhow::Result<()> {
        self.write_header(context)?;
        self.write_summary(context.report)?;
        self.write_insights(context.report)?;
        self.write_readings(context.input)?;
        self.write_recommendations(context.report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, context: &ReportContext<'_>) -> anyhow::Result<()> {
        writeln!(self.writer, "# Metabolic Screening Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Screening: {}", context.label)?;
        writeln!(
            self.writer,
            "Generated: {}",
            context.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Metabolic Risk Score | {} / 100 |", report.score)?;
        writeln!(self.writer, "| Risk Level | {} |", report.level)?;
        writeln!(
            self.writer,
            "| Metabolic Syndrome | {} |",
            if report.metabolic_syndrome { "Yes" } else { "No" }
        )?;
        for (label, value) in report.sub_scores.entries() {
            writeln!(self.writer, "| {} | {:.1}% |", label, value)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_insights(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Insights")?;
        writeln!(self.writer)?;
        for insight in report_insights(report) {
            writeln!(self.writer, "- {}", insight)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_readings(&mut self, input: &ScreeningInput) -> anyhow::Result<()> {
        let rows = reading_rows(input);
        let lifestyle = lifestyle_lines(input);
        if rows.is_empty() && lifestyle.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Readings")?;
        writeln!(self.writer)?;
        if !rows.is_empty() {
            writeln!(self.writer, "| Biomarker | Value | Unit | Range | Status |")?;
            writeln!(self.writer, "|-----------|-------|------|-------|--------|")?;
            for mut row in rows {
                if row.abnormal {
                    row.cells[4] = format!("**{}**", row.cells[4]);
                }
                writeln!(self.writer, "| {} |", row.cells.join(" | "))?;
            }
            writeln!(self.writer)?;
        }
        for line in lifestyle {
            writeln!(self.writer, "- {}", line)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_recommendations(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        if report.recommendations.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Recommendations")?;
        writeln!(self.writer)?;
        for rec in &report.recommendations {
            writeln!(
                self.writer,
                "- **[{}]** {} (priority: {})",
                rec.category, rec.text, rec.priority
            )?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, context: &ReportContext<'_>) -> anyhow::Result<()> {
        self.print_header(context)?;
        self.print_summary(context.report)?;
        self.print_insights(context.report)?;
        self.print_readings(context.input)?;
        self.print_recommendations(context.report)?;
        Ok(())
    }
}

fn level_colored(level: RiskLevel, text: String) -> ColoredString {
    match level {
        RiskLevel::Low => text.green(),
        RiskLevel::Moderate => text.yellow(),
        RiskLevel::High => text.red(),
    }
}

impl<W: Write> TerminalWriter<W> {
    fn print_header(&mut self, context: &ReportContext<'_>) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Metabolic Screening Report".bold().blue())?;
        writeln!(self.writer, "{}", "==========================".blue())?;
        writeln!(self.writer, "Screening: {}", context.label)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_summary(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        let score = level_colored(report.level, format!("{} / 100", report.score));
        let level = level_colored(report.level, report.level.to_string());
        writeln!(self.writer, "{}", "Summary:".bold())?;
        writeln!(self.writer, "  Metabolic risk score: {}", score)?;
        writeln!(self.writer, "  Risk level: {}", level)?;
        if report.metabolic_syndrome {
            writeln!(self.writer, "  {}", "Metabolic syndrome indicated".red())?;
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec!["Risk", "Estimate"]);
        for (label, value) in report.sub_scores.entries() {
            table.add_row(vec![label.to_string(), format!("{:.1}%", value)]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_insights(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Insights:".bold())?;
        for insight in report_insights(report) {
            if report.is_clear() {
                writeln!(self.writer, "  - {}", insight.green())?;
            } else {
                writeln!(self.writer, "  - {}", insight.yellow())?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_readings(&mut self, input: &ScreeningInput) -> anyhow::Result<()> {
        let rows = reading_rows(input);
        if !rows.is_empty() {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_header(vec!["Biomarker", "Value", "Unit", "Range", "Status"]);
            for row in rows {
                table.add_row(row.cells.to_vec());
            }
            writeln!(self.writer, "{}", "Readings:".bold())?;
            writeln!(self.writer, "{table}")?;
        }
        for line in lifestyle_lines(input) {
            writeln!(self.writer, "  {}", line)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_recommendations(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        if report.recommendations.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "{}", "Recommendations:".bold())?;
        for (i, rec) in report.recommendations.iter().enumerate() {
            writeln!(
                self.writer,
                "  {}. [{}] {} ({})",
                i + 1,
                rec.category.to_string().cyan(),
                rec.text,
                rec.priority
            )?;
        }
        Ok(())
    }
}
