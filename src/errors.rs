//! Error types for the screening boundary, configuration loading and the
//! screening lifecycle.
//!
//! The scoring engine itself has no failure mode: every rule is guarded by a
//! presence check, so nothing in `risk` returns these errors. They are raised
//! by the layers around it:
//!
//! - [`InputError`] / [`InputErrors`]: raw readings rejected at the data-entry
//!   boundary (unknown symbol, wrong type, negative value, ...)
//! - [`ConfigError`]: `.biomarker-risk.toml` could not be read, parsed or
//!   validated
//! - [`ScreeningError`]: a lifecycle transition was requested from the wrong
//!   state
//!
//! Command handlers wrap all of them in `anyhow::Error`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::screening::ScreeningStatus;

/// A single rejected reading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("unknown biomarker symbol `{0}`")]
    UnknownSymbol(String),

    #[error("`{symbol}` expects a number, got {found}")]
    ExpectedNumber { symbol: String, found: String },

    #[error("`{symbol}` expects one of [{expected}], got {found}")]
    UnknownCategory {
        symbol: String,
        expected: &'static str,
        found: String,
    },

    #[error("`{symbol}` must be a finite number")]
    NonFinite { symbol: String },

    #[error("`{symbol}` must not be negative (got {value})")]
    Negative { symbol: String, value: f64 },

    #[error("`{symbol}` must be greater than zero")]
    NotPositive { symbol: String },
}

impl InputError {
    /// Symbol the error refers to.
    pub fn symbol(&self) -> &str {
        match self {
            Self::UnknownSymbol(symbol) => symbol,
            Self::ExpectedNumber { symbol, .. }
            | Self::UnknownCategory { symbol, .. }
            | Self::NonFinite { symbol }
            | Self::Negative { symbol, .. }
            | Self::NotPositive { symbol } => symbol,
        }
    }
}

/// Every problem found in one readings set.
///
/// The boundary accumulates errors instead of failing on the first one so a
/// caller can report all bad fields at once.
#[derive(Debug, Clone, PartialEq)]
pub struct InputErrors(pub Vec<InputError>);

impl InputErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputError> {
        self.0.iter()
    }
}

impl fmt::Display for InputErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid reading(s)", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for InputErrors {}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Lifecycle misuse on a [`crate::screening::Screening`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScreeningError {
    #[error("screening is {0}; only draft screenings can be submitted")]
    NotDraft(ScreeningStatus),

    #[error("screening is {0}; only completed screenings can be re-scored")]
    NotCompleted(ScreeningStatus),
}
