use super::discovery::DiscoveryConfig;
use super::parallel::ParallelConfig;
use super::scoring::ScoringConfig;
use super::thresholds::ThresholdsConfig;
use crate::analyzers::guard::NestingLimits;
use serde::{Deserialize, Serialize};

/// Root configuration structure for riskmap, read from `.riskmap.toml`.
///
/// Every section and key is optional; anything missing takes its default.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RiskmapConfig {
    #[serde(default)]
    pub thresholds: ThresholdsConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub parallel: ParallelConfig,
}

impl RiskmapConfig {
    /// Parser guard limits, with indentation capped at `thresholds.nesting_limit`.
    pub fn nesting_limits(&self) -> NestingLimits {
        NestingLimits {
            indentation: self.thresholds.nesting_limit,
            ..NestingLimits::default()
        }
    }
}
