use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{self, ScreeningConfig};
use crate::core::ScreeningInput;
use crate::io::{self, create_writer, OutputFormat, ReportContext};
use crate::risk::RiskEngine;
use crate::screening::Screening;

pub struct ScoreConfig {
    pub readings: PathBuf,
    pub config: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub label: Option<String>,
    pub plain: bool,
}

pub fn handle_score(config: ScoreConfig) -> Result<()> {
    let screening_config = resolve_config(config.config.as_deref())?;
    let format = config
        .format
        .or_else(|| screening_config.default_format())
        .unwrap_or(OutputFormat::Terminal);

    if config.plain || config.output.is_some() {
        colored::control::set_override(false);
    }

    let label = config
        .label
        .clone()
        .unwrap_or_else(|| default_label(&config.readings));
    let screening = score_readings_file(&config.readings, label, &screening_config)?;
    let context = ReportContext::from_screening(&screening)
        .context("Screening was not scored")?;

    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            let mut out = BufWriter::new(file);
            create_writer(format, &mut out).write_report(&context)?;
            out.flush()?;
            log::info!("Report written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            create_writer(format, &mut out).write_report(&context)?;
        }
    }

    Ok(())
}

/// Read, validate and score one readings file.
pub fn score_readings_file(
    path: &Path,
    label: String,
    config: &ScreeningConfig,
) -> Result<Screening> {
    let raw = io::read_readings(path)?;
    let input = ScreeningInput::from_raw(&raw)
        .with_context(|| format!("Invalid readings in {}", path.display()))?;
    if input.is_empty() {
        log::warn!("{} contains no readings; scoring base risk only", path.display());
    }

    let engine = RiskEngine::new(config.policy());
    log::debug!(
        "Scoring with cap {} (extended rules: {})",
        engine.policy().scoring.score_cap,
        engine.policy().scoring.extended_rules
    );
    let mut screening = Screening::new(label, input);
    screening.submit(&engine)?;
    Ok(screening)
}

fn resolve_config(explicit: Option<&Path>) -> Result<ScreeningConfig> {
    match explicit {
        Some(path) => Ok(config::load_config_from_path(path)?),
        None => Ok(config::load_config()),
    }
}

fn default_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("screening")
        .to_string()
}
