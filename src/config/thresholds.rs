use serde::{Deserialize, Serialize};

/// Cut-offs used by the risk heuristics, the parser guard and test-target selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ThresholdsConfig {
    /// A function is highly complex above this cyclomatic complexity.
    #[serde(default = "default_complexity")]
    pub complexity: u32,

    /// A file is deeply nested above this nesting depth.
    #[serde(default = "default_nesting")]
    pub nesting: u32,

    /// Indentation levels the parser accepts before giving up on a file.
    #[serde(default = "default_nesting_limit")]
    pub nesting_limit: usize,

    /// Minimum risk score for a function to become a test target.
    #[serde(default = "default_target_risk")]
    pub target_risk: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            complexity: default_complexity(),
            nesting: default_nesting(),
            nesting_limit: default_nesting_limit(),
            target_risk: default_target_risk(),
        }
    }
}

fn default_complexity() -> u32 {
    10
}
fn default_nesting() -> u32 {
    3
}
fn default_nesting_limit() -> usize {
    crate::analyzers::guard::DEFAULT_INDENTATION_LIMIT
}
fn default_target_risk() -> f64 {
    0.5
}
