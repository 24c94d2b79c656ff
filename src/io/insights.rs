use crate::risk::RiskReport;

pub const ALL_NORMAL: &str = "All biomarker levels are within normal ranges.";

/// Human-readable insight lines for a report, one per fired rule.
pub fn report_insights(report: &RiskReport) -> Vec<String> {
    if report.factors.is_empty() {
        return vec![ALL_NORMAL.to_string()];
    }

    report
        .factors
        .iter()
        .map(|factor| format!("{}: {}", factor.flag, factor.rationale))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Marker, ScreeningInput};
    use crate::risk;

    #[test]
    fn test_clear_report_uses_fallback() {
        let report = risk::score(&ScreeningInput::new().with(Marker::Ldl, 100.0));
        assert_eq!(report_insights(&report), vec![ALL_NORMAL]);
    }

    #[test]
    fn test_one_insight_per_factor() {
        let input = ScreeningInput::new()
            .with(Marker::Ldl, 150.0)
            .with(Marker::Creatinine, 1.4);
        let report = risk::score(&input);
        assert_eq!(
            report_insights(&report),
            vec![
                "High LDL: Risk of atherosclerosis",
                "Elevated Creatinine: Reduced kidney filtration",
            ]
        );
    }
}
