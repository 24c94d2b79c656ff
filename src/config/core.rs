use serde::{Deserialize, Serialize};

use super::scoring::{RiskLevelBounds, ScoringConfig, ScoringPolicy, SubScoreFactors};
use crate::io::output::OutputFormat;

/// Root configuration structure for `.biomarker-risk.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ScreeningConfig {
    /// Base score, cap and rule-set switches
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    /// Risk-level boundaries
    #[serde(default)]
    pub levels: Option<RiskLevelBounds>,

    /// Sub-score factors and modifiers
    #[serde(default)]
    pub subscores: Option<SubScoreFactors>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    pub default_format: Option<OutputFormat>,
}

impl ScreeningConfig {
    /// Resolve the scoring policy, filling absent sections with defaults.
    pub fn policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            scoring: self.scoring.clone().unwrap_or_default(),
            levels: self.levels.unwrap_or_default(),
            subscores: self.subscores.clone().unwrap_or_default(),
        }
    }

    pub fn default_format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|output| output.default_format)
    }
}
