//! Data-entry boundary: raw symbol maps to [`ScreeningInput`].
//!
//! Readings arrive as a flat `symbol -> value` map (a submitted form, a JSON
//! or TOML file). Validation happens here and only here; the scoring engine
//! trusts what it receives.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{AlcoholFrequency, Marker, ScreeningInput, SmokingStatus};
use crate::errors::{InputError, InputErrors};

pub const SMOKING_STATUS: &str = "smoking_status";
pub const ALCOHOL_FREQUENCY: &str = "alcohol_frequency";

/// One untyped reading value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Flag(bool),
    Null,
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Text(s) => write!(f, "\"{}\"", s),
            RawValue::Flag(b) => write!(f, "{}", b),
            RawValue::Null => f.write_str("null"),
        }
    }
}

pub type RawReadings = BTreeMap<String, RawValue>;

impl ScreeningInput {
    /// Convert and validate a raw readings map.
    ///
    /// Nulls are treated as "not measured". All problems are collected before
    /// returning.
    pub fn from_raw(raw: &RawReadings) -> Result<ScreeningInput, InputErrors> {
        let mut input = ScreeningInput::new();
        let mut errors = Vec::new();

        for (symbol, value) in raw {
            if matches!(value, RawValue::Null) {
                continue;
            }
            let result = match symbol.as_str() {
                SMOKING_STATUS => {
                    parse_category(symbol, value, SmokingStatus::LABELS, SmokingStatus::parse)
                        .map(|status| input.lifestyle.smoking_status = Some(status))
                }
                ALCOHOL_FREQUENCY => {
                    parse_category(symbol, value, AlcoholFrequency::LABELS, AlcoholFrequency::parse)
                        .map(|frequency| input.lifestyle.alcohol_frequency = Some(frequency))
                }
                _ => match Marker::from_symbol(symbol) {
                    Some(marker) => parse_measurement(marker, value)
                        .map(|measured| input.set(marker, Some(measured))),
                    None => Err(InputError::UnknownSymbol(symbol.clone())),
                },
            };
            if let Err(error) = result {
                errors.push(error);
            }
        }

        if errors.is_empty() {
            Ok(input)
        } else {
            Err(InputErrors(errors))
        }
    }

    /// Inverse of [`ScreeningInput::from_raw`], used when echoing readings back.
    pub fn to_raw(&self) -> RawReadings {
        let mut raw: RawReadings = self
            .present()
            .map(|(marker, value)| (marker.symbol().to_string(), RawValue::Number(value)))
            .collect();
        if let Some(status) = self.lifestyle.smoking_status {
            raw.insert(SMOKING_STATUS.into(), RawValue::Text(label_of(&status)));
        }
        if let Some(frequency) = self.lifestyle.alcohol_frequency {
            raw.insert(ALCOHOL_FREQUENCY.into(), RawValue::Text(label_of(&frequency)));
        }
        raw
    }
}

fn label_of<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(label)) => label,
        _ => String::new(),
    }
}

fn parse_measurement(marker: Marker, value: &RawValue) -> Result<f64, InputError> {
    let symbol = marker.symbol().to_string();
    let number = match value {
        RawValue::Number(n) => *n,
        other => {
            return Err(InputError::ExpectedNumber {
                symbol,
                found: other.to_string(),
            })
        }
    };

    if !number.is_finite() {
        return Err(InputError::NonFinite { symbol });
    }
    if number < 0.0 {
        return Err(InputError::Negative {
            symbol,
            value: number,
        });
    }
    // Height divides the BMI and HDL divides the TG/HDL ratio.
    if matches!(marker, Marker::Height | Marker::Hdl) && number == 0.0 {
        return Err(InputError::NotPositive { symbol });
    }
    Ok(number)
}

fn parse_category<T>(
    symbol: &str,
    value: &RawValue,
    expected: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, InputError> {
    let unknown = || InputError::UnknownCategory {
        symbol: symbol.to_string(),
        expected,
        found: value.to_string(),
    };
    match value {
        RawValue::Text(label) => parse(label).ok_or_else(unknown),
        _ => Err(unknown()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(pairs: &[(&str, RawValue)]) -> RawReadings {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_from_raw_maps_numbers_and_categories() {
        let readings = raw(&[
            ("glucose_fasting", RawValue::Number(110.0)),
            ("systolic_bp", RawValue::Number(135.0)),
            ("smoking_status", RawValue::Text("Current".into())),
            ("alcohol_frequency", RawValue::Text("weekly".into())),
        ]);

        let input = ScreeningInput::from_raw(&readings).unwrap();
        assert_eq!(input.biomarkers.glucose_fasting, Some(110.0));
        assert_eq!(input.vitals.systolic_bp, Some(135.0));
        assert_eq!(input.lifestyle.smoking_status, Some(SmokingStatus::Current));
        assert_eq!(
            input.lifestyle.alcohol_frequency,
            Some(AlcoholFrequency::Weekly)
        );
    }

    #[test]
    fn test_null_is_not_measured() {
        let readings = raw(&[("ldl", RawValue::Null), ("smoking_status", RawValue::Null)]);
        let input = ScreeningInput::from_raw(&readings).unwrap();
        assert!(input.is_empty());
    }

    #[test]
    fn test_zero_is_a_measurement() {
        let readings = raw(&[("alt", RawValue::Number(0.0))]);
        let input = ScreeningInput::from_raw(&readings).unwrap();
        assert_eq!(input.biomarkers.alt, Some(0.0));
    }

    #[test]
    fn test_zero_divisors_are_rejected() {
        let readings = raw(&[
            ("hdl", RawValue::Number(0.0)),
            ("height", RawValue::Number(0.0)),
            ("triglycerides", RawValue::Number(0.0)),
        ]);
        let errors = ScreeningInput::from_raw(&readings).unwrap_err();
        assert_eq!(
            errors.0,
            vec![
                InputError::NotPositive {
                    symbol: "hdl".to_string()
                },
                InputError::NotPositive {
                    symbol: "height".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_errors_are_accumulated() {
        let readings = raw(&[
            ("glucose_fasting", RawValue::Text("high".into())),
            ("hdl", RawValue::Number(-1.0)),
            ("height", RawValue::Number(0.0)),
            ("ldl", RawValue::Number(f64::NAN)),
            ("smoking_status", RawValue::Text("sometimes".into())),
            ("vitamin_q", RawValue::Number(1.0)),
        ]);

        let errors = ScreeningInput::from_raw(&readings).unwrap_err();
        let symbols: Vec<&str> = errors.iter().map(|e| e.symbol()).collect();
        assert_eq!(
            symbols,
            vec![
                "glucose_fasting",
                "hdl",
                "height",
                "ldl",
                "smoking_status",
                "vitamin_q"
            ]
        );
    }

    #[test]
    fn test_category_rejects_numbers() {
        let readings = raw(&[("alcohol_frequency", RawValue::Number(3.0))]);
        let errors = ScreeningInput::from_raw(&readings).unwrap_err();
        assert!(matches!(
            errors.0[0],
            InputError::UnknownCategory { .. }
        ));
    }

    #[test]
    fn test_to_raw_roundtrips_through_from_raw() {
        let input = ScreeningInput::new()
            .with(Marker::Hba1c, 6.1)
            .with(Marker::Weight, 82.5)
            .with_smoking(SmokingStatus::Former)
            .with_alcohol(AlcoholFrequency::Daily);

        let raw = input.to_raw();
        assert_eq!(raw.get("smoking_status"), Some(&RawValue::Text("former".into())));
        assert_eq!(ScreeningInput::from_raw(&raw).unwrap(), input);
    }

    #[test]
    fn test_raw_readings_deserialize_from_json() {
        let readings: RawReadings = serde_json::from_str(
            r#"{"hba1c": 6.1, "ldl": 120, "smoking_status": "never", "crp": null}"#,
        )
        .unwrap();
        assert_eq!(readings.get("ldl"), Some(&RawValue::Number(120.0)));
        assert_eq!(readings.get("crp"), Some(&RawValue::Null));
    }
}
