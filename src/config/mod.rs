// Sub-modules
mod core;
mod loader;
mod scoring;

pub use self::core::{OutputConfig, ScreeningConfig};

pub use scoring::{
    default_base_score, default_daily_alcohol_liver_bonus, default_diabetes_1yr_factor,
    default_diabetes_5yr_factor, default_extended_rules, default_fatty_liver_factor,
    default_heart_factor, default_homa_insulin_resistance, default_insulin_resistance_factor,
    default_low_max, default_moderate_max, default_obesity_factor, default_score_cap,
    default_smoker_heart_bonus, default_syndrome_threshold, RiskLevelBounds, ScoringConfig,
    ScoringPolicy, SubScoreFactors,
};

pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
