use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# biomarker-risk configuration

[scoring]
# Score every screening starts from
base_score = 10
# Upper clamp for the accumulated score (1-100)
score_cap = 100
# TG/HDL ratio, systolic blood pressure, smoking and BMI rules
# (only for screenings with vitals or lifestyle recorded)
extended_rules = true
# Estimate insulin resistance from fasting glucose instead of the score
homa_insulin_resistance = false
# Scores above this set the metabolic syndrome indicator
syndrome_threshold = 50

[levels]
# Low: score <= low_max, Moderate: score <= moderate_max, High: above
low_max = 30
moderate_max = 60

[subscores]
diabetes_1yr = 0.4
diabetes_5yr = 0.7
heart = 0.3
fatty_liver = 0.5
obesity = 0.2
insulin_resistance = 0.6
smoker_heart_bonus = 10.0
daily_alcohol_liver_bonus = 10.0

[output]
default_format = "terminal"
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    init_config_at(&config_path, force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

pub fn init_config_at(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(config_path, DEFAULT_CONFIG)?;
    log::debug!("Wrote default configuration to {}", config_path.display());

    Ok(())
}
