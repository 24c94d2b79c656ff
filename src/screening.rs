//! Screening lifecycle around the scoring engine.
//!
//! `Draft -> Submitted -> Completed`. A completed screening holds exactly one
//! report; re-scoring replaces both the input and the report rather than
//! appending a new one. Persistence of screenings belongs to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::ScreeningInput;
use crate::errors::ScreeningError;
use crate::risk::{RiskEngine, RiskReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreeningStatus {
    Draft,
    Submitted,
    Completed,
}

impl fmt::Display for ScreeningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScreeningStatus::Draft => "draft",
            ScreeningStatus::Submitted => "submitted",
            ScreeningStatus::Completed => "completed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screening {
    label: String,
    status: ScreeningStatus,
    input: ScreeningInput,
    report: Option<RiskReport>,
    updated_at: DateTime<Utc>,
}

impl Screening {
    pub fn new(label: impl Into<String>, input: ScreeningInput) -> Self {
        Self {
            label: label.into(),
            status: ScreeningStatus::Draft,
            input,
            report: None,
            updated_at: Utc::now(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn status(&self) -> ScreeningStatus {
        self.status
    }

    pub fn input(&self) -> &ScreeningInput {
        &self.input
    }

    pub fn report(&self) -> Option<&RiskReport> {
        self.report.as_ref()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the readings of a draft.
    pub fn edit(&mut self, input: ScreeningInput) -> Result<(), ScreeningError> {
        if self.status != ScreeningStatus::Draft {
            return Err(ScreeningError::NotDraft(self.status));
        }
        self.input = input;
        self.touch();
        Ok(())
    }

    /// Submit a draft and score it synchronously.
    pub fn submit(&mut self, engine: &RiskEngine) -> Result<&RiskReport, ScreeningError> {
        if self.status != ScreeningStatus::Draft {
            return Err(ScreeningError::NotDraft(self.status));
        }
        self.transition(ScreeningStatus::Submitted);
        let report = engine.score(&self.input);
        Ok(self.complete(report))
    }

    /// Score new readings for a completed screening, replacing the old report.
    pub fn rescore(
        &mut self,
        input: ScreeningInput,
        engine: &RiskEngine,
    ) -> Result<&RiskReport, ScreeningError> {
        if self.status != ScreeningStatus::Completed {
            return Err(ScreeningError::NotCompleted(self.status));
        }
        self.input = input;
        let report = engine.score(&self.input);
        log::debug!("Replacing report of screening '{}'", self.label);
        Ok(self.complete(report))
    }

    fn complete(&mut self, report: RiskReport) -> &RiskReport {
        log::info!(
            "Screening '{}' scored {} ({})",
            self.label,
            report.score,
            report.level
        );
        self.transition(ScreeningStatus::Completed);
        self.report.insert(report)
    }

    fn transition(&mut self, next: ScreeningStatus) {
        if self.status != next {
            log::debug!(
                "Screening '{}': {} -> {}",
                self.label,
                self.status,
                next
            );
        }
        self.status = next;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Marker;

    #[test]
    fn test_new_screening_is_draft_without_report() {
        let screening = Screening::new("walk-in", ScreeningInput::new());
        assert_eq!(screening.status(), ScreeningStatus::Draft);
        assert!(screening.report().is_none());
    }

    #[test]
    fn test_submit_completes_and_stores_report() {
        let engine = RiskEngine::default();
        let mut screening = Screening::new(
            "walk-in",
            ScreeningInput::new().with(Marker::GlucoseFasting, 145.0),
        );

        let score = screening.submit(&engine).unwrap().score;
        assert_eq!(score, 50);
        assert_eq!(screening.status(), ScreeningStatus::Completed);
        assert_eq!(screening.report().map(|r| r.score), Some(50));
    }

    #[test]
    fn test_submit_twice_is_rejected() {
        let engine = RiskEngine::default();
        let mut screening = Screening::new("walk-in", ScreeningInput::new());
        screening.submit(&engine).unwrap();

        let err = screening.submit(&engine).unwrap_err();
        assert_eq!(err, ScreeningError::NotDraft(ScreeningStatus::Completed));
    }

    #[test]
    fn test_rescore_replaces_report() {
        let engine = RiskEngine::default();
        let mut screening = Screening::new(
            "walk-in",
            ScreeningInput::new().with(Marker::Hba1c, 7.0),
        );
        screening.submit(&engine).unwrap();
        assert_eq!(screening.report().unwrap().flags, vec!["High HbA1c (Diabetes)"]);

        let report = screening
            .rescore(ScreeningInput::new().with(Marker::Hba1c, 5.2), &engine)
            .unwrap();
        assert_eq!(report.score, 10);
        assert!(report.flags.is_empty());
        assert_eq!(screening.input().biomarkers.hba1c, Some(5.2));
    }

    #[test]
    fn test_rescore_requires_completed() {
        let engine = RiskEngine::default();
        let mut screening = Screening::new("walk-in", ScreeningInput::new());
        let err = screening
            .rescore(ScreeningInput::new(), &engine)
            .unwrap_err();
        assert_eq!(err, ScreeningError::NotCompleted(ScreeningStatus::Draft));
    }

    #[test]
    fn test_edit_only_in_draft() {
        let engine = RiskEngine::default();
        let mut screening = Screening::new("walk-in", ScreeningInput::new());
        screening
            .edit(ScreeningInput::new().with(Marker::Ldl, 150.0))
            .unwrap();
        screening.submit(&engine).unwrap();
        assert!(screening.edit(ScreeningInput::new()).is_err());
        assert_eq!(screening.report().unwrap().flags, vec!["High LDL"]);
    }
}
