//! Metabolic risk scoring engine.
//!
//! [`RiskEngine::score`] is a pure function of a [`ScreeningInput`] and a
//! [`ScoringPolicy`]: it starts from the base score, adds the points of every
//! fired threshold rule, clamps to the policy cap and derives the sub-scores
//! from the capped value. It performs no I/O and holds no mutable state, so
//! one engine can be shared freely across threads.
//!
//! ```
//! use biomarker_risk::core::{Marker, ScreeningInput};
//! use biomarker_risk::risk::{self, RiskLevel};
//!
//! let input = ScreeningInput::new().with(Marker::GlucoseFasting, 145.0);
//! let report = risk::score(&input);
//!
//! assert_eq!(report.score, 50);
//! assert_eq!(report.level, RiskLevel::Moderate);
//! assert_eq!(report.flags, vec!["Diabetes Range (Fasting)"]);
//! ```

pub mod recommendations;
pub mod rules;
pub mod subscores;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ScoringPolicy;
use crate::core::ScreeningInput;

pub use recommendations::{Priority, Recommendation, RecommendationCategory};
pub use subscores::SubScores;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        };
        f.write_str(label)
    }
}

/// One fired rule, with the points it contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    #[serde(rename = "risk_name")]
    pub flag: String,
    pub marker: String,
    pub points: u32,
    #[serde(rename = "description")]
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    #[serde(rename = "metabolic_score")]
    pub score: u32,
    #[serde(rename = "risk_level")]
    pub level: RiskLevel,
    #[serde(flatten)]
    pub sub_scores: SubScores,
    #[serde(rename = "syndrome_flags")]
    pub flags: Vec<String>,
    pub abnormal_markers: Vec<String>,
    #[serde(rename = "metabolic_syndrome_flag")]
    pub metabolic_syndrome: bool,
    #[serde(rename = "risk_factors")]
    pub factors: Vec<RiskFactor>,
    pub recommendations: Vec<Recommendation>,
}

impl RiskReport {
    pub fn is_clear(&self) -> bool {
        self.flags.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    policy: ScoringPolicy,
}

impl RiskEngine {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn score(&self, input: &ScreeningInput) -> RiskReport {
        let scoring = &self.policy.scoring;
        let findings = rules::evaluate(input, scoring.extended_rules);

        let accumulated = findings
            .iter()
            .fold(scoring.base_score, |acc, finding| {
                acc.saturating_add(finding.points)
            });
        let score = accumulated.min(scoring.score_cap);

        let sub_scores = subscores::derive(
            score,
            input,
            &self.policy.subscores,
            scoring.homa_insulin_resistance,
        );

        RiskReport {
            score,
            level: self.policy.levels.classify(score),
            sub_scores,
            flags: findings.iter().map(|f| f.flag.clone()).collect(),
            abnormal_markers: findings.iter().map(|f| f.marker.to_string()).collect(),
            metabolic_syndrome: score > scoring.syndrome_threshold,
            recommendations: recommendations::collect(&findings),
            factors: findings
                .into_iter()
                .map(|f| RiskFactor {
                    flag: f.flag,
                    marker: f.marker.to_string(),
                    points: f.points,
                    rationale: f.rationale,
                })
                .collect(),
        }
    }
}

/// Score with the default policy.
pub fn score(input: &ScreeningInput) -> RiskReport {
    RiskEngine::default().score(input)
}
