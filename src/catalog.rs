//! Biomarker reference catalog.
//!
//! Reference ranges are used for display (the "Status" column of a report),
//! not for scoring. Where a scoring rule exists the range edge matches the
//! rule threshold so the table and the flags agree.

use serde::Serialize;
use std::fmt;

use crate::core::Marker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Glucose,
    Lipid,
    Kidney,
    Liver,
    Hormone,
    Inflammation,
    Vitals,
    Body,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Inclusive normal range; either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ReferenceRange {
    const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    const fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn classify(&self, value: f64) -> ReadingStatus {
        match (self.min, self.max) {
            (Some(min), _) if value < min => ReadingStatus::Low,
            (_, Some(max)) if value > max => ReadingStatus::High,
            _ => ReadingStatus::Normal,
        }
    }
}

impl fmt::Display for ReferenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) => write!(f, "{}-{}", min, max),
            (Some(min), None) => write!(f, ">= {}", min),
            (None, Some(max)) => write!(f, "<= {}", max),
            (None, None) => f.write_str("-"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReadingStatus {
    Low,
    Normal,
    High,
}

impl ReadingStatus {
    pub fn is_abnormal(self) -> bool {
        self != ReadingStatus::Normal
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub marker: Marker,
    pub name: &'static str,
    pub category: Category,
    pub unit: &'static str,
    pub range: Option<ReferenceRange>,
}

const fn entry(
    marker: Marker,
    name: &'static str,
    category: Category,
    unit: &'static str,
    range: Option<ReferenceRange>,
) -> CatalogEntry {
    CatalogEntry {
        marker,
        name,
        category,
        unit,
        range,
    }
}

/// One entry per [`Marker`], in [`Marker::ALL`] order.
pub const CATALOG: [CatalogEntry; 20] = [
    entry(
        Marker::GlucoseFasting,
        "Fasting Glucose",
        Category::Glucose,
        "mg/dL",
        Some(ReferenceRange::between(70.0, 100.0)),
    ),
    entry(
        Marker::GlucosePp,
        "Post-prandial Glucose",
        Category::Glucose,
        "mg/dL",
        Some(ReferenceRange::at_most(140.0)),
    ),
    entry(
        Marker::Hba1c,
        "Hemoglobin A1c",
        Category::Glucose,
        "%",
        Some(ReferenceRange::between(4.0, 5.7)),
    ),
    entry(
        Marker::Hdl,
        "HDL Cholesterol",
        Category::Lipid,
        "mg/dL",
        Some(ReferenceRange::at_least(40.0)),
    ),
    entry(
        Marker::Ldl,
        "LDL Cholesterol",
        Category::Lipid,
        "mg/dL",
        Some(ReferenceRange::at_most(130.0)),
    ),
    entry(
        Marker::Triglycerides,
        "Triglycerides",
        Category::Lipid,
        "mg/dL",
        Some(ReferenceRange::at_most(150.0)),
    ),
    entry(
        Marker::Cholesterol,
        "Total Cholesterol",
        Category::Lipid,
        "mg/dL",
        Some(ReferenceRange::between(125.0, 200.0)),
    ),
    entry(
        Marker::Creatinine,
        "Creatinine",
        Category::Kidney,
        "mg/dL",
        Some(ReferenceRange::between(0.6, 1.2)),
    ),
    entry(
        Marker::Urea,
        "Blood Urea Nitrogen",
        Category::Kidney,
        "mg/dL",
        Some(ReferenceRange::between(7.0, 20.0)),
    ),
    entry(
        Marker::Alt,
        "Alanine Aminotransferase",
        Category::Liver,
        "U/L",
        Some(ReferenceRange::at_most(40.0)),
    ),
    entry(
        Marker::Ast,
        "Aspartate Aminotransferase",
        Category::Liver,
        "U/L",
        Some(ReferenceRange::at_most(40.0)),
    ),
    entry(
        Marker::Insulin,
        "Fasting Insulin",
        Category::Hormone,
        "uIU/mL",
        Some(ReferenceRange::between(2.0, 25.0)),
    ),
    entry(
        Marker::Tsh,
        "Thyroid Stimulating Hormone",
        Category::Hormone,
        "mIU/L",
        Some(ReferenceRange::between(0.4, 4.0)),
    ),
    entry(
        Marker::Crp,
        "C-Reactive Protein",
        Category::Inflammation,
        "mg/L",
        Some(ReferenceRange::at_most(3.0)),
    ),
    entry(
        Marker::Esr,
        "Erythrocyte Sedimentation Rate",
        Category::Inflammation,
        "mm/hr",
        Some(ReferenceRange::at_most(20.0)),
    ),
    entry(
        Marker::SystolicBp,
        "Systolic Blood Pressure",
        Category::Vitals,
        "mmHg",
        Some(ReferenceRange::between(90.0, 130.0)),
    ),
    entry(
        Marker::DiastolicBp,
        "Diastolic Blood Pressure",
        Category::Vitals,
        "mmHg",
        Some(ReferenceRange::between(60.0, 80.0)),
    ),
    entry(
        Marker::HeartRate,
        "Heart Rate",
        Category::Vitals,
        "bpm",
        Some(ReferenceRange::between(60.0, 100.0)),
    ),
    entry(Marker::Height, "Height", Category::Body, "cm", None),
    entry(Marker::Weight, "Weight", Category::Body, "kg", None),
];

pub fn lookup(marker: Marker) -> &'static CatalogEntry {
    // CATALOG is indexed in Marker::ALL order
    let index = Marker::ALL
        .iter()
        .position(|m| *m == marker)
        .unwrap_or_default();
    &CATALOG[index]
}

/// Status of a reading against its reference range; `None` when the marker
/// has no range (height, weight).
pub fn classify(marker: Marker, value: f64) -> Option<ReadingStatus> {
    lookup(marker).range.map(|range| range.classify(value))
}
