//! Typed screening input.
//!
//! A screening is a set of optional readings. `None` always means "not
//! measured" and is never scored as zero. Raw symbol maps coming from a form
//! or a file are converted into [`ScreeningInput`] by [`readings`], which is
//! where type and range validation happens.

pub mod readings;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use readings::{RawReadings, RawValue};

/// Numeric readings a screening can carry: lab biomarkers plus vitals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    // Glucose profile
    GlucoseFasting,
    GlucosePp,
    Hba1c,
    // Lipid profile
    Hdl,
    Ldl,
    Triglycerides,
    Cholesterol,
    // Kidney
    Creatinine,
    Urea,
    // Liver
    Alt,
    Ast,
    // Others
    Insulin,
    Tsh,
    Crp,
    Esr,
    // Vitals
    SystolicBp,
    DiastolicBp,
    HeartRate,
    Height,
    Weight,
}

impl Marker {
    pub const ALL: [Marker; 20] = [
        Marker::GlucoseFasting,
        Marker::GlucosePp,
        Marker::Hba1c,
        Marker::Hdl,
        Marker::Ldl,
        Marker::Triglycerides,
        Marker::Cholesterol,
        Marker::Creatinine,
        Marker::Urea,
        Marker::Alt,
        Marker::Ast,
        Marker::Insulin,
        Marker::Tsh,
        Marker::Crp,
        Marker::Esr,
        Marker::SystolicBp,
        Marker::DiastolicBp,
        Marker::HeartRate,
        Marker::Height,
        Marker::Weight,
    ];

    /// Symbol used in readings files and in the abnormal-marker list.
    pub fn symbol(self) -> &'static str {
        match self {
            Marker::GlucoseFasting => "glucose_fasting",
            Marker::GlucosePp => "glucose_pp",
            Marker::Hba1c => "hba1c",
            Marker::Hdl => "hdl",
            Marker::Ldl => "ldl",
            Marker::Triglycerides => "triglycerides",
            Marker::Cholesterol => "cholesterol",
            Marker::Creatinine => "creatinine",
            Marker::Urea => "urea",
            Marker::Alt => "alt",
            Marker::Ast => "ast",
            Marker::Insulin => "insulin",
            Marker::Tsh => "tsh",
            Marker::Crp => "crp",
            Marker::Esr => "esr",
            Marker::SystolicBp => "systolic_bp",
            Marker::DiastolicBp => "diastolic_bp",
            Marker::HeartRate => "heart_rate",
            Marker::Height => "height",
            Marker::Weight => "weight",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Marker> {
        Marker::ALL.into_iter().find(|marker| marker.symbol() == symbol)
    }

    pub fn is_vital(self) -> bool {
        matches!(
            self,
            Marker::SystolicBp
                | Marker::DiastolicBp
                | Marker::HeartRate
                | Marker::Height
                | Marker::Weight
        )
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmokingStatus {
    Never,
    Former,
    Current,
}

impl SmokingStatus {
    pub const LABELS: &'static str = "never, former, current";

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "never" => Some(Self::Never),
            "former" => Some(Self::Former),
            "current" => Some(Self::Current),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlcoholFrequency {
    Never,
    Occasional,
    Weekly,
    Daily,
}

impl AlcoholFrequency {
    pub const LABELS: &'static str = "never, occasional, weekly, daily";

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "never" => Some(Self::Never),
            "occasional" => Some(Self::Occasional),
            "weekly" => Some(Self::Weekly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

/// Lab panel values. Units follow the catalog (mg/dL, %, U/L, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerPanel {
    pub glucose_fasting: Option<f64>,
    pub glucose_pp: Option<f64>,
    pub hba1c: Option<f64>,
    pub hdl: Option<f64>,
    pub ldl: Option<f64>,
    pub triglycerides: Option<f64>,
    pub cholesterol: Option<f64>,
    pub creatinine: Option<f64>,
    pub urea: Option<f64>,
    pub alt: Option<f64>,
    pub ast: Option<f64>,
    pub insulin: Option<f64>,
    pub tsh: Option<f64>,
    pub crp: Option<f64>,
    pub esr: Option<f64>,
}

/// Vitals and physical snapshot. Height in cm, weight in kg.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub systolic_bp: Option<f64>,
    pub diastolic_bp: Option<f64>,
    pub heart_rate: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lifestyle {
    pub smoking_status: Option<SmokingStatus>,
    pub alcohol_frequency: Option<AlcoholFrequency>,
}

/// Immutable input to the scoring engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningInput {
    #[serde(default)]
    pub biomarkers: BiomarkerPanel,
    #[serde(default)]
    pub vitals: Vitals,
    #[serde(default)]
    pub lifestyle: Lifestyle,
}

impl ScreeningInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, marker: Marker) -> Option<f64> {
        let b = &self.biomarkers;
        let v = &self.vitals;
        match marker {
            Marker::GlucoseFasting => b.glucose_fasting,
            Marker::GlucosePp => b.glucose_pp,
            Marker::Hba1c => b.hba1c,
            Marker::Hdl => b.hdl,
            Marker::Ldl => b.ldl,
            Marker::Triglycerides => b.triglycerides,
            Marker::Cholesterol => b.cholesterol,
            Marker::Creatinine => b.creatinine,
            Marker::Urea => b.urea,
            Marker::Alt => b.alt,
            Marker::Ast => b.ast,
            Marker::Insulin => b.insulin,
            Marker::Tsh => b.tsh,
            Marker::Crp => b.crp,
            Marker::Esr => b.esr,
            Marker::SystolicBp => v.systolic_bp,
            Marker::DiastolicBp => v.diastolic_bp,
            Marker::HeartRate => v.heart_rate,
            Marker::Height => v.height,
            Marker::Weight => v.weight,
        }
    }

    fn slot_mut(&mut self, marker: Marker) -> &mut Option<f64> {
        let b = &mut self.biomarkers;
        let v = &mut self.vitals;
        match marker {
            Marker::GlucoseFasting => &mut b.glucose_fasting,
            Marker::GlucosePp => &mut b.glucose_pp,
            Marker::Hba1c => &mut b.hba1c,
            Marker::Hdl => &mut b.hdl,
            Marker::Ldl => &mut b.ldl,
            Marker::Triglycerides => &mut b.triglycerides,
            Marker::Cholesterol => &mut b.cholesterol,
            Marker::Creatinine => &mut b.creatinine,
            Marker::Urea => &mut b.urea,
            Marker::Alt => &mut b.alt,
            Marker::Ast => &mut b.ast,
            Marker::Insulin => &mut b.insulin,
            Marker::Tsh => &mut b.tsh,
            Marker::Crp => &mut b.crp,
            Marker::Esr => &mut b.esr,
            Marker::SystolicBp => &mut v.systolic_bp,
            Marker::DiastolicBp => &mut v.diastolic_bp,
            Marker::HeartRate => &mut v.heart_rate,
            Marker::Height => &mut v.height,
            Marker::Weight => &mut v.weight,
        }
    }

    pub fn set(&mut self, marker: Marker, value: Option<f64>) {
        *self.slot_mut(marker) = value;
    }

    /// Builder form of [`ScreeningInput::set`].
    pub fn with(mut self, marker: Marker, value: f64) -> Self {
        self.set(marker, Some(value));
        self
    }

    pub fn with_smoking(mut self, status: SmokingStatus) -> Self {
        self.lifestyle.smoking_status = Some(status);
        self
    }

    pub fn with_alcohol(mut self, frequency: AlcoholFrequency) -> Self {
        self.lifestyle.alcohol_frequency = Some(frequency);
        self
    }

    /// Markers that carry a value, in [`Marker::ALL`] order.
    pub fn present(&self) -> impl Iterator<Item = (Marker, f64)> + '_ {
        Marker::ALL
            .into_iter()
            .filter_map(|marker| self.value(marker).map(|value| (marker, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
            && self.lifestyle.smoking_status.is_none()
            && self.lifestyle.alcohol_frequency.is_none()
    }

    /// True when any vital or lifestyle field was recorded.
    pub fn has_vitals_or_lifestyle(&self) -> bool {
        self.present().any(|(marker, _)| marker.is_vital())
            || self.lifestyle.smoking_status.is_some()
            || self.lifestyle.alcohol_frequency.is_some()
    }

    /// Body-mass index from height (cm) and weight (kg).
    pub fn bmi(&self) -> Option<f64> {
        let height_m = self.vitals.height? / 100.0;
        let weight = self.vitals.weight?;
        if height_m <= 0.0 {
            return None;
        }
        Some(weight / (height_m * height_m))
    }

    pub fn is_current_smoker(&self) -> bool {
        self.lifestyle.smoking_status == Some(SmokingStatus::Current)
    }

    pub fn drinks_daily(&self) -> bool {
        self.lifestyle.alcohol_frequency == Some(AlcoholFrequency::Daily)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_symbol_roundtrip_covers_all_markers() {
        for marker in Marker::ALL {
            assert_eq!(Marker::from_symbol(marker.symbol()), Some(marker));
        }
        assert_eq!(Marker::from_symbol("smoking_status"), None);
    }

    #[test]
    fn test_value_and_set_address_the_same_slot() {
        let mut input = ScreeningInput::new();
        for (i, marker) in Marker::ALL.into_iter().enumerate() {
            input.set(marker, Some(i as f64));
        }
        for (i, marker) in Marker::ALL.into_iter().enumerate() {
            assert_eq!(input.value(marker), Some(i as f64), "{}", marker);
        }
    }

    #[test]
    fn test_bmi_requires_height_and_weight() {
        let input = ScreeningInput::new().with(Marker::Height, 170.0);
        assert_eq!(input.bmi(), None);

        let input = input.with(Marker::Weight, 95.0);
        let bmi = input.bmi().unwrap();
        assert!((bmi - 32.87).abs() < 0.01);
    }

    #[test]
    fn test_bmi_ignores_zero_height() {
        let input = ScreeningInput::new()
            .with(Marker::Height, 0.0)
            .with(Marker::Weight, 70.0);
        assert_eq!(input.bmi(), None);
    }

    #[test]
    fn test_lifestyle_labels_are_case_insensitive() {
        assert_eq!(SmokingStatus::parse("Current"), Some(SmokingStatus::Current));
        assert_eq!(SmokingStatus::parse(" never "), Some(SmokingStatus::Never));
        assert_eq!(AlcoholFrequency::parse("DAILY"), Some(AlcoholFrequency::Daily));
        assert_eq!(AlcoholFrequency::parse("sometimes"), None);
    }

    #[test]
    fn test_vitals_or_lifestyle_presence() {
        let labs = ScreeningInput::new()
            .with(Marker::Triglycerides, 120.0)
            .with(Marker::Hdl, 50.0);
        assert!(!labs.has_vitals_or_lifestyle());
        assert!(labs.clone().with(Marker::HeartRate, 70.0).has_vitals_or_lifestyle());
        assert!(labs.with_alcohol(AlcoholFrequency::Never).has_vitals_or_lifestyle());
    }

    #[test]
    fn test_empty_input() {
        assert!(ScreeningInput::new().is_empty());
        assert!(!ScreeningInput::new()
            .with_smoking(SmokingStatus::Never)
            .is_empty());
    }
}
