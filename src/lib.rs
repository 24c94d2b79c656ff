// Export modules for library usage
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod risk;
pub mod screening;

// Re-export commonly used types
pub use crate::core::{
    AlcoholFrequency, BiomarkerPanel, Lifestyle, Marker, RawReadings, RawValue, ScreeningInput,
    SmokingStatus, Vitals,
};

pub use crate::config::{ScoringPolicy, ScreeningConfig};

pub use crate::errors::{ConfigError, InputError, InputErrors, ScreeningError};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::risk::{
    score, Priority, Recommendation, RecommendationCategory, RiskEngine, RiskFactor, RiskLevel,
    RiskReport, SubScores,
};

pub use crate::screening::{Screening, ScreeningStatus};
