//! Scoring policy configuration
//!
//! The rule thresholds themselves are fixed clinical constants (see
//! `risk::rules`). What a deployment may tune lives here:
//! - Base score, score cap and syndrome threshold
//! - Whether the extended (vitals / lifestyle) rule set runs
//! - Risk-level boundaries
//! - Sub-score factors and lifestyle modifiers

use serde::{Deserialize, Serialize};

use crate::risk::RiskLevel;

/// `[scoring]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Score every screening starts from
    #[serde(default = "default_base_score")]
    pub base_score: u32,

    /// Upper clamp for the accumulated score (1-100)
    #[serde(default = "default_score_cap")]
    pub score_cap: u32,

    /// Evaluate TG/HDL ratio, blood pressure, smoking and BMI rules when the
    /// screening recorded any vitals or lifestyle field
    #[serde(default = "default_extended_rules")]
    pub extended_rules: bool,

    /// Derive insulin resistance from fasting glucose when it is present
    #[serde(default = "default_homa_insulin_resistance")]
    pub homa_insulin_resistance: bool,

    /// Scores strictly above this mark the metabolic-syndrome indicator
    #[serde(default = "default_syndrome_threshold")]
    pub syndrome_threshold: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: default_base_score(),
            score_cap: default_score_cap(),
            extended_rules: default_extended_rules(),
            homa_insulin_resistance: default_homa_insulin_resistance(),
            syndrome_threshold: default_syndrome_threshold(),
        }
    }
}

impl ScoringConfig {
    pub fn collect_validations(&self) -> Vec<Result<(), String>> {
        vec![
            if (1..=100).contains(&self.score_cap) {
                Ok(())
            } else {
                Err(format!(
                    "score_cap must be between 1 and 100, got {}",
                    self.score_cap
                ))
            },
            if self.base_score <= self.score_cap {
                Ok(())
            } else {
                Err(format!(
                    "base_score ({}) must not exceed score_cap ({})",
                    self.base_score, self.score_cap
                ))
            },
        ]
    }
}

/// `[levels]` section: inclusive upper bounds of Low and Moderate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLevelBounds {
    #[serde(default = "default_low_max")]
    pub low_max: u32,

    #[serde(default = "default_moderate_max")]
    pub moderate_max: u32,
}

impl Default for RiskLevelBounds {
    fn default() -> Self {
        Self {
            low_max: default_low_max(),
            moderate_max: default_moderate_max(),
        }
    }
}

impl RiskLevelBounds {
    pub fn classify(&self, score: u32) -> RiskLevel {
        if score <= self.low_max {
            RiskLevel::Low
        } else if score <= self.moderate_max {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.low_max < self.moderate_max {
            Ok(())
        } else {
            Err(format!(
                "levels.low_max ({}) must be below levels.moderate_max ({})",
                self.low_max, self.moderate_max
            ))
        }
    }
}

/// `[subscores]` section: multipliers applied to the capped score plus
/// additive lifestyle modifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScoreFactors {
    #[serde(default = "default_diabetes_1yr_factor")]
    pub diabetes_1yr: f64,

    #[serde(default = "default_diabetes_5yr_factor")]
    pub diabetes_5yr: f64,

    #[serde(default = "default_heart_factor")]
    pub heart: f64,

    #[serde(default = "default_fatty_liver_factor")]
    pub fatty_liver: f64,

    #[serde(default = "default_obesity_factor")]
    pub obesity: f64,

    #[serde(default = "default_insulin_resistance_factor")]
    pub insulin_resistance: f64,

    /// Added to the heart sub-score for current smokers
    #[serde(default = "default_smoker_heart_bonus")]
    pub smoker_heart_bonus: f64,

    /// Added to the fatty-liver sub-score for daily drinkers
    #[serde(default = "default_daily_alcohol_liver_bonus")]
    pub daily_alcohol_liver_bonus: f64,
}

impl Default for SubScoreFactors {
    fn default() -> Self {
        Self {
            diabetes_1yr: default_diabetes_1yr_factor(),
            diabetes_5yr: default_diabetes_5yr_factor(),
            heart: default_heart_factor(),
            fatty_liver: default_fatty_liver_factor(),
            obesity: default_obesity_factor(),
            insulin_resistance: default_insulin_resistance_factor(),
            smoker_heart_bonus: default_smoker_heart_bonus(),
            daily_alcohol_liver_bonus: default_daily_alcohol_liver_bonus(),
        }
    }
}

impl SubScoreFactors {
    // Pure function: a factor must be a finite, non-negative number
    pub fn validate_factor(value: f64, name: &str) -> Result<(), String> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(format!(
                "subscores.{} must be a non-negative number, got {}",
                name, value
            ))
        }
    }

    pub fn collect_validations(&self) -> Vec<Result<(), String>> {
        vec![
            Self::validate_factor(self.diabetes_1yr, "diabetes_1yr"),
            Self::validate_factor(self.diabetes_5yr, "diabetes_5yr"),
            Self::validate_factor(self.heart, "heart"),
            Self::validate_factor(self.fatty_liver, "fatty_liver"),
            Self::validate_factor(self.obesity, "obesity"),
            Self::validate_factor(self.insulin_resistance, "insulin_resistance"),
            Self::validate_factor(self.smoker_heart_bonus, "smoker_heart_bonus"),
            Self::validate_factor(
                self.daily_alcohol_liver_bonus,
                "daily_alcohol_liver_bonus",
            ),
        ]
    }
}

/// Everything the engine needs, resolved from config sections and defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub scoring: ScoringConfig,
    pub levels: RiskLevelBounds,
    pub subscores: SubScoreFactors,
}

impl ScoringPolicy {
    /// All validation messages, empty when the policy is usable.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut results = self.scoring.collect_validations();
        results.push(self.levels.validate());
        results.extend(self.subscores.collect_validations());
        results.into_iter().filter_map(Result::err).collect()
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub fn default_base_score() -> u32 {
    10
}
pub fn default_score_cap() -> u32 {
    100
}
pub fn default_extended_rules() -> bool {
    true
}
pub fn default_homa_insulin_resistance() -> bool {
    false
}
pub fn default_syndrome_threshold() -> u32 {
    50
}
pub fn default_low_max() -> u32 {
    30
}
pub fn default_moderate_max() -> u32 {
    60
}
pub fn default_diabetes_1yr_factor() -> f64 {
    0.4
}
pub fn default_diabetes_5yr_factor() -> f64 {
    0.7
}
pub fn default_heart_factor() -> f64 {
    0.3
}
pub fn default_fatty_liver_factor() -> f64 {
    0.5
}
pub fn default_obesity_factor() -> f64 {
    0.2
}
pub fn default_insulin_resistance_factor() -> f64 {
    0.6
}
pub fn default_smoker_heart_bonus() -> f64 {
    10.0
}
pub fn default_daily_alcohol_liver_bonus() -> f64 {
    10.0
}
