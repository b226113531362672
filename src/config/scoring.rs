//! Weights of the additive risk heuristics.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    /// Added when a function's cyclomatic complexity exceeds the threshold.
    #[serde(default = "default_complexity_weight")]
    pub complexity_weight: f64,

    /// Added to every function of a file whose nesting depth exceeds the threshold.
    #[serde(default = "default_nesting_weight")]
    pub nesting_weight: f64,

    /// Added to every function of a file importing one of `framework_modules`.
    #[serde(default = "default_framework_weight")]
    pub framework_weight: f64,

    /// Modules whose import marks a file as a request handler or inference route.
    /// Matched exactly against the imported module name.
    #[serde(default = "default_framework_modules")]
    pub framework_modules: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            complexity_weight: default_complexity_weight(),
            nesting_weight: default_nesting_weight(),
            framework_weight: default_framework_weight(),
            framework_modules: default_framework_modules(),
        }
    }
}

impl ScoringConfig {
    pub fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    /// Every weight must lie in `0.0..=1.0`.
    pub fn validate(&self) -> Result<(), String> {
        [
            ("complexity_weight", self.complexity_weight),
            ("nesting_weight", self.nesting_weight),
            ("framework_weight", self.framework_weight),
        ]
        .into_iter()
        .find(|(_, weight)| !Self::is_valid_weight(*weight))
        .map_or(Ok(()), |(name, weight)| {
            Err(format!("{name} must be between 0.0 and 1.0, got {weight}"))
        })
    }
}

pub fn default_complexity_weight() -> f64 {
    0.4
}
pub fn default_nesting_weight() -> f64 {
    0.2
}
pub fn default_framework_weight() -> f64 {
    0.2
}
pub fn default_framework_modules() -> Vec<String> {
    ["fastapi", "pydantic", "uvicorn"]
        .into_iter()
        .map(String::from)
        .collect()
}
