use serde::{Deserialize, Serialize};
use std::fmt;

use super::rules::Finding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationCategory {
    Diet,
    Medical,
    Lifestyle,
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Diet => "Diet",
            Self::Medical => "Medical",
            Self::Lifestyle => "Lifestyle",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Static recommendation attached to a rule tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advice {
    pub category: RecommendationCategory,
    pub text: &'static str,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    #[serde(rename = "description")]
    pub text: String,
    pub priority: Priority,
}

impl From<Advice> for Recommendation {
    fn from(advice: Advice) -> Self {
        Self {
            category: advice.category,
            text: advice.text.to_string(),
            priority: advice.priority,
        }
    }
}

/// Recommendations of the fired rules, first occurrence wins.
pub fn collect(findings: &[Finding]) -> Vec<Recommendation> {
    let mut seen = Vec::new();
    findings
        .iter()
        .filter_map(|finding| finding.advice)
        .filter(|advice| {
            if seen.contains(&advice.text) {
                false
            } else {
                seen.push(advice.text);
                true
            }
        })
        .map(Recommendation::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Marker, ScreeningInput, SmokingStatus};
    use crate::risk::rules::evaluate;

    #[test]
    fn test_no_findings_no_recommendations() {
        assert!(collect(&[]).is_empty());
    }

    #[test]
    fn test_recommendations_follow_rule_order() {
        let input = ScreeningInput::new()
            .with(Marker::Hba1c, 7.0)
            .with(Marker::Ldl, 160.0)
            .with_smoking(SmokingStatus::Current);
        let recommendations = collect(&evaluate(&input, true));

        let categories: Vec<RecommendationCategory> =
            recommendations.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                RecommendationCategory::Medical,
                RecommendationCategory::Lifestyle,
                RecommendationCategory::Lifestyle,
            ]
        );
        assert_eq!(recommendations[1].priority, Priority::Medium);
    }

    #[test]
    fn test_flag_only_rules_add_no_recommendation() {
        let input = ScreeningInput::new()
            .with(Marker::Creatinine, 2.0)
            .with(Marker::Alt, 80.0);
        assert!(collect(&evaluate(&input, true)).is_empty());
    }

    #[test]
    fn test_duplicate_advice_is_collapsed() {
        let advice = Advice {
            category: RecommendationCategory::Diet,
            text: "Eat more fibre.",
            priority: Priority::Low,
        };
        let finding = |flag: &str| Finding {
            flag: flag.to_string(),
            marker: "x",
            points: 1,
            rationale: String::new(),
            advice: Some(advice),
        };
        let collected = collect(&[finding("a"), finding("b")]);
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].text, "Eat more fibre.");
    }
}
