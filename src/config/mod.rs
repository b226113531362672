//! Run configuration, loaded from `.riskmap.toml`.

mod core;
mod discovery;
mod loader;
mod parallel;
mod scoring;
mod thresholds;

pub use self::core::RiskmapConfig;
pub use discovery::DiscoveryConfig;
pub use loader::{load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use parallel::ParallelConfig;
pub use scoring::{
    default_complexity_weight, default_framework_modules, default_framework_weight,
    default_nesting_weight, ScoringConfig,
};
pub use thresholds::ThresholdsConfig;
