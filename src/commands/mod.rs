//! CLI command implementations.
//!
//! - **score**: validate a readings file, score it and render the report
//! - **init**: write a default `.biomarker-risk.toml`
//! - **catalog**: list supported biomarkers and their reference ranges

pub mod catalog;
pub mod init;
pub mod score;

pub use catalog::show_catalog;
pub use init::init_config;
pub use score::{handle_score, ScoreConfig};
