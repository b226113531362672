use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Which files the walker hands to the analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Skip files whose name contains `test`.
    #[serde(default = "default_true")]
    pub exclude_tests: bool,

    /// Skip dot-files and dot-directories.
    #[serde(default = "default_true")]
    pub exclude_hidden: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            exclude_tests: true,
            exclude_hidden: true,
        }
    }
}
