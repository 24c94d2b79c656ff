use serde::{Deserialize, Serialize};

use crate::config::SubScoreFactors;
use crate::core::ScreeningInput;

pub const SUB_SCORE_CAP: f64 = 100.0;

/// Fasting insulin assumed by the glucose-only insulin-resistance estimate.
pub const ASSUMED_FASTING_INSULIN: f64 = 20.0;
pub const HOMA_IR_DIVISOR: f64 = 405.0;

/// Derived percentages, each in 0-100 and rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SubScores {
    #[serde(rename = "diabetes_risk_1yr")]
    pub diabetes_1yr: f64,
    #[serde(rename = "diabetes_risk_5yr")]
    pub diabetes_5yr: f64,
    #[serde(rename = "heart_risk")]
    pub heart: f64,
    #[serde(rename = "fatty_liver_risk")]
    pub fatty_liver: f64,
    #[serde(rename = "obesity_risk")]
    pub obesity: f64,
    #[serde(rename = "insulin_resistance_score")]
    pub insulin_resistance: f64,
}

impl SubScores {
    /// `(label, value)` pairs in display order.
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("Diabetes (1 yr)", self.diabetes_1yr),
            ("Diabetes (5 yr)", self.diabetes_5yr),
            ("Heart disease", self.heart),
            ("Fatty liver", self.fatty_liver),
            ("Obesity", self.obesity),
            ("Insulin resistance", self.insulin_resistance),
        ]
    }
}

/// Glucose-only HOMA-IR style approximation.
pub fn homa_ir_approximation(fasting_glucose: f64) -> f64 {
    fasting_glucose * ASSUMED_FASTING_INSULIN / HOMA_IR_DIVISOR
}

// Pure function: cap at 100 and round to one decimal (both monotonic)
fn finish(value: f64) -> f64 {
    (value.min(SUB_SCORE_CAP) * 10.0).round() / 10.0
}

/// Derive sub-scores from the capped score plus lifestyle modifiers.
pub fn derive(
    score: u32,
    input: &ScreeningInput,
    factors: &SubScoreFactors,
    homa_insulin_resistance: bool,
) -> SubScores {
    let base = f64::from(score);
    let heart_modifier = if input.is_current_smoker() {
        factors.smoker_heart_bonus
    } else {
        0.0
    };
    let liver_modifier = if input.drinks_daily() {
        factors.daily_alcohol_liver_bonus
    } else {
        0.0
    };
    let insulin_resistance = match input.biomarkers.glucose_fasting {
        Some(glucose) if homa_insulin_resistance => homa_ir_approximation(glucose),
        _ => base * factors.insulin_resistance,
    };

    SubScores {
        diabetes_1yr: finish(base * factors.diabetes_1yr),
        diabetes_5yr: finish(base * factors.diabetes_5yr),
        heart: finish(base * factors.heart + heart_modifier),
        fatty_liver: finish(base * factors.fatty_liver + liver_modifier),
        obesity: finish(base * factors.obesity),
        insulin_resistance: finish(insulin_resistance),
    }
}
