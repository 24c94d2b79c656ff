//! Threshold rule table.
//!
//! Each marker rule lists its tiers from most to least severe; only the first
//! tier that admits the value fires, so a marker contributes at most once.
//! Different markers never suppress each other.
//!
//! The extended set (TG/HDL ratio, systolic BP, smoking, BMI) only runs when
//! the policy enables it and the screening recorded at least one vital or
//! lifestyle field. A lab-only panel is scored on the core rules alone.

use super::recommendations::{Advice, Priority, RecommendationCategory};
use crate::core::{Marker, ScreeningInput};

/// Comparison a tier applies to a reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Above(f64),
    Below(f64),
}

impl Bound {
    pub fn admits(self, value: f64) -> bool {
        match self {
            Bound::Above(limit) => value > limit,
            Bound::Below(limit) => value < limit,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Tier {
    pub bound: Bound,
    /// Zero for flag-only rules (kidney, liver)
    pub points: u32,
    pub flag: &'static str,
    pub rationale: &'static str,
    pub advice: Option<Advice>,
}

#[derive(Debug, Clone, Copy)]
pub struct MarkerRule {
    pub marker: Marker,
    pub tiers: &'static [Tier],
}

/// A rule that fired.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub flag: String,
    pub marker: &'static str,
    pub points: u32,
    pub rationale: String,
    pub advice: Option<Advice>,
}

impl Finding {
    fn from_tier(marker: &'static str, tier: &Tier) -> Self {
        Self {
            flag: tier.flag.to_string(),
            marker,
            points: tier.points,
            rationale: tier.rationale.to_string(),
            advice: tier.advice,
        }
    }
}

const GLUCOSE_DIET: Advice = Advice {
    category: RecommendationCategory::Diet,
    text: "Reduce sugar intake and consider intermittent fasting.",
    priority: Priority::High,
};

const ENDOCRINE_REFERRAL: Advice = Advice {
    category: RecommendationCategory::Medical,
    text: "Consult an endocrinologist for further tests.",
    priority: Priority::High,
};

const CARDIO_EXERCISE: Advice = Advice {
    category: RecommendationCategory::Lifestyle,
    text: "Increase cardio exercise to 30 minutes daily.",
    priority: Priority::Medium,
};

const REDUCE_SODIUM: Advice = Advice {
    category: RecommendationCategory::Lifestyle,
    text: "Reduce sodium intake.",
    priority: Priority::High,
};

const SMOKING_CESSATION: Advice = Advice {
    category: RecommendationCategory::Lifestyle,
    text: "Consider a smoking cessation program.",
    priority: Priority::High,
};

const CALORIC_DEFICIT: Advice = Advice {
    category: RecommendationCategory::Diet,
    text: "A caloric deficit diet is recommended.",
    priority: Priority::High,
};

pub const CORE_RULES: &[MarkerRule] = &[
    MarkerRule {
        marker: Marker::GlucoseFasting,
        tiers: &[
            Tier {
                bound: Bound::Above(126.0),
                points: 40,
                flag: "Diabetes Range (Fasting)",
                rationale: "Fasting glucose is in the diabetic range",
                advice: Some(GLUCOSE_DIET),
            },
            Tier {
                bound: Bound::Above(100.0),
                points: 15,
                flag: "Prediabetes Range (Fasting)",
                rationale: "Early sign of insulin resistance",
                advice: Some(GLUCOSE_DIET),
            },
        ],
    },
    MarkerRule {
        marker: Marker::GlucosePp,
        tiers: &[Tier {
            bound: Bound::Above(200.0),
            points: 30,
            flag: "High PP Glucose",
            rationale: "Post-prandial glucose is in the diabetic range",
            advice: None,
        }],
    },
    MarkerRule {
        marker: Marker::Hba1c,
        tiers: &[
            Tier {
                bound: Bound::Above(6.5),
                points: 40,
                flag: "High HbA1c (Diabetes)",
                rationale: "Three-month average glucose is in the diabetic range",
                advice: Some(ENDOCRINE_REFERRAL),
            },
            Tier {
                bound: Bound::Above(5.7),
                points: 15,
                flag: "Elevated HbA1c",
                rationale: "Pre-diabetic range",
                advice: Some(ENDOCRINE_REFERRAL),
            },
        ],
    },
    MarkerRule {
        marker: Marker::Hdl,
        tiers: &[Tier {
            bound: Bound::Below(40.0),
            points: 10,
            flag: "Low HDL",
            rationale: "Low protective cholesterol",
            advice: None,
        }],
    },
    MarkerRule {
        marker: Marker::Ldl,
        tiers: &[Tier {
            bound: Bound::Above(130.0),
            points: 15,
            flag: "High LDL",
            rationale: "Risk of atherosclerosis",
            advice: Some(CARDIO_EXERCISE),
        }],
    },
    MarkerRule {
        marker: Marker::Triglycerides,
        tiers: &[Tier {
            bound: Bound::Above(150.0),
            points: 10,
            flag: "High Triglycerides",
            rationale: "Elevated circulating fat",
            advice: None,
        }],
    },
    MarkerRule {
        marker: Marker::Creatinine,
        tiers: &[Tier {
            bound: Bound::Above(1.2),
            points: 0,
            flag: "Elevated Creatinine",
            rationale: "Reduced kidney filtration",
            advice: None,
        }],
    },
    MarkerRule {
        marker: Marker::Alt,
        tiers: &[Tier {
            bound: Bound::Above(40.0),
            points: 0,
            flag: "Elevated ALT",
            rationale: "Possible liver inflammation",
            advice: None,
        }],
    },
];

pub const SYSTOLIC_BP_RULE: MarkerRule = MarkerRule {
    marker: Marker::SystolicBp,
    tiers: &[Tier {
        bound: Bound::Above(130.0),
        points: 10,
        flag: "Hypertension",
        rationale: "High blood pressure detected",
        advice: Some(REDUCE_SODIUM),
    }],
};

pub const TG_HDL_RATIO_MARKER: &str = "tg_hdl_ratio";
pub const TG_HDL_RATIO_LIMIT: f64 = 2.0;
const TG_HDL_RATIO_POINTS: u32 = 10;

pub const SMOKING_MARKER: &str = "smoking_status";
const SMOKING_POINTS: u32 = 15;

pub const BMI_MARKER: &str = "bmi";
pub const BMI_OBESITY_LIMIT: f64 = 30.0;
const BMI_POINTS: u32 = 10;

/// Fire every applicable rule, in table order.
pub fn evaluate(input: &ScreeningInput, extended: bool) -> Vec<Finding> {
    let mut findings: Vec<Finding> = CORE_RULES
        .iter()
        .filter_map(|rule| evaluate_marker_rule(rule, input))
        .collect();

    if extended && input.has_vitals_or_lifestyle() {
        findings.extend(
            [
                evaluate_tg_hdl_ratio(input),
                evaluate_marker_rule(&SYSTOLIC_BP_RULE, input),
                evaluate_smoking(input),
                evaluate_bmi(input),
            ]
            .into_iter()
            .flatten(),
        );
    }

    findings
}

pub fn evaluate_marker_rule(rule: &MarkerRule, input: &ScreeningInput) -> Option<Finding> {
    let value = input.value(rule.marker)?;
    rule.tiers
        .iter()
        .find(|tier| tier.bound.admits(value))
        .map(|tier| Finding::from_tier(rule.marker.symbol(), tier))
}

pub fn tg_hdl_ratio(input: &ScreeningInput) -> Option<f64> {
    let tg = input.biomarkers.triglycerides?;
    let hdl = input.biomarkers.hdl?;
    if hdl > 0.0 {
        Some(tg / hdl)
    } else if tg > 0.0 {
        // Any triglycerides over a zero HDL exceed every ratio limit.
        Some(f64::INFINITY)
    } else {
        None
    }
}

fn evaluate_tg_hdl_ratio(input: &ScreeningInput) -> Option<Finding> {
    let ratio = tg_hdl_ratio(input)?;
    (ratio > TG_HDL_RATIO_LIMIT).then(|| Finding {
        flag: "High TG/HDL Ratio".to_string(),
        marker: TG_HDL_RATIO_MARKER,
        points: TG_HDL_RATIO_POINTS,
        rationale: "Indicator of metabolic syndrome".to_string(),
        advice: None,
    })
}

fn evaluate_smoking(input: &ScreeningInput) -> Option<Finding> {
    input.is_current_smoker().then(|| Finding {
        flag: "Smoking".to_string(),
        marker: SMOKING_MARKER,
        points: SMOKING_POINTS,
        rationale: "Significant cardiovascular risk".to_string(),
        advice: Some(SMOKING_CESSATION),
    })
}

fn evaluate_bmi(input: &ScreeningInput) -> Option<Finding> {
    let bmi = input.bmi()?;
    (bmi > BMI_OBESITY_LIMIT).then(|| Finding {
        flag: format!("Obesity (BMI {:.1})", bmi),
        marker: BMI_MARKER,
        points: BMI_POINTS,
        rationale: format!("BMI is {:.1}", bmi),
        advice: Some(CALORIC_DEFICIT),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SmokingStatus;

    fn flags(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.flag.as_str()).collect()
    }

    #[test]
    fn test_tiers_are_ordered_most_severe_first() {
        for rule in CORE_RULES {
            for pair in rule.tiers.windows(2) {
                assert!(pair[0].points >= pair[1].points, "{}", rule.marker);
            }
        }
    }

    #[test]
    fn test_only_highest_glucose_tier_fires() {
        let input = ScreeningInput::new().with(Marker::GlucoseFasting, 145.0);
        let findings = evaluate(&input, true);
        assert_eq!(flags(&findings), vec!["Diabetes Range (Fasting)"]);
        assert_eq!(findings[0].points, 40);
        assert_eq!(findings[0].marker, "glucose_fasting");
    }

    #[test]
    fn test_boundaries_are_strict() {
        let input = ScreeningInput::new()
            .with(Marker::GlucoseFasting, 100.0)
            .with(Marker::Hba1c, 5.7)
            .with(Marker::Hdl, 40.0)
            .with(Marker::Ldl, 130.0)
            .with(Marker::Triglycerides, 80.0)
            .with(Marker::Creatinine, 1.2)
            .with(Marker::Alt, 40.0)
            .with(Marker::SystolicBp, 130.0);
        assert!(evaluate(&input, true).is_empty());
    }

    #[test]
    fn test_flag_only_rules_carry_no_points() {
        let input = ScreeningInput::new()
            .with(Marker::Creatinine, 1.5)
            .with(Marker::Alt, 55.0);
        let findings = evaluate(&input, true);
        assert_eq!(flags(&findings), vec!["Elevated Creatinine", "Elevated ALT"]);
        assert!(findings.iter().all(|f| f.points == 0));
    }

    #[test]
    fn test_extended_rules_can_be_disabled() {
        let input = ScreeningInput::new()
            .with(Marker::SystolicBp, 150.0)
            .with_smoking(SmokingStatus::Current);
        assert!(evaluate(&input, false).is_empty());
        assert_eq!(flags(&evaluate(&input, true)), vec!["Hypertension", "Smoking"]);
    }

    #[test]
    fn test_tg_hdl_ratio_requires_both_lipids() {
        let input = ScreeningInput::new()
            .with(Marker::Triglycerides, 140.0)
            .with_smoking(SmokingStatus::Never);
        assert_eq!(tg_hdl_ratio(&input), None);

        let input = input.with(Marker::Hdl, 50.0);
        assert_eq!(tg_hdl_ratio(&input), Some(2.8));
        assert_eq!(flags(&evaluate(&input, true)), vec!["High TG/HDL Ratio"]);
    }

    #[test]
    fn test_lab_only_panel_skips_extended_rules() {
        let input = ScreeningInput::new()
            .with(Marker::GlucoseFasting, 90.0)
            .with(Marker::Triglycerides, 120.0)
            .with(Marker::Hdl, 50.0);
        assert_eq!(tg_hdl_ratio(&input), Some(2.4));
        assert!(evaluate(&input, true).is_empty());
    }

    #[test]
    fn test_zero_hdl_exceeds_ratio_limit() {
        let input = ScreeningInput::new()
            .with(Marker::Triglycerides, 100.0)
            .with(Marker::Hdl, 0.0)
            .with_smoking(SmokingStatus::Never);
        assert_eq!(tg_hdl_ratio(&input), Some(f64::INFINITY));
        assert_eq!(flags(&evaluate(&input, true)), vec!["Low HDL", "High TG/HDL Ratio"]);

        let input = input.with(Marker::Triglycerides, 0.0);
        assert_eq!(tg_hdl_ratio(&input), None);
    }

    #[test]
    fn test_bmi_flag_includes_one_decimal() {
        let input = ScreeningInput::new()
            .with(Marker::Height, 170.0)
            .with(Marker::Weight, 95.0);
        let findings = evaluate(&input, true);
        assert_eq!(flags(&findings), vec!["Obesity (BMI 32.9)"]);
        assert_eq!(findings[0].marker, "bmi");
    }

    #[test]
    fn test_former_smoker_does_not_fire() {
        let input = ScreeningInput::new().with_smoking(SmokingStatus::Former);
        assert!(evaluate(&input, true).is_empty());
    }
}
