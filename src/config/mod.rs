//! Configuration module for styleprint
//!
//! This module handles:
//! - Engine thresholds and composite weights (styleprint.toml)
//! - User-level config discovery
//! - The example config written by `styleprint init`

mod engine_config;

pub use engine_config::{
    BaselineConfig,
    CompositeWeights,
    EngineConfig,
    ErrorConfig,
    FlagThresholds,
    NgramConfig,
    OutlierMethod,
    SignificanceLevels,
    CONFIG_FILENAME,
    EXAMPLE_CONFIG,
    load_engine_config,
    load_toml_config,
};
