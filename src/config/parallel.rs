//! Parallelism configuration for batch analysis.

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

/// Controls how the aggregator fans out over files.
///
/// # Example
///
/// ```rust
/// use riskmap::config::ParallelConfig;
///
/// let config = ParallelConfig {
///     enabled: true,
///     max_concurrency: Some(4),
/// };
/// assert_eq!(config.effective_concurrency(), 4);
/// assert_eq!(ParallelConfig::sequential().effective_concurrency(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParallelConfig {
    /// When disabled, files are processed one at a time on the calling thread.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Worker thread count. Uses every available core when unset.
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_concurrency: None,
        }
    }
}

impl ParallelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn effective_concurrency(&self) -> usize {
        if !self.enabled {
            return 1;
        }
        self.max_concurrency.unwrap_or_else(num_cpus).max(1)
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}
