//! Per-function risk scoring.
//!
//! A function's score is the sum of the weights of the heuristics it triggers,
//! capped at 1.0:
//!
//! 1. its cyclomatic complexity exceeds the complexity threshold;
//! 2. its file nests deeper than the nesting threshold;
//! 3. its file imports a recognised web or inference framework.
//!
//! Heuristics 2 and 3 are file-level signals and apply to every function in
//! the file alike.

pub mod priority;

use crate::config::{RiskmapConfig, ScoringConfig, ThresholdsConfig};
use crate::core::metrics::round2;
use crate::core::{
    AnalysisResult, FileReport, FileRisks, MetricsReport, ModuleStructure, RiskEntry, RiskMap,
    RiskReason,
};

pub use priority::{select_test_targets, TestTarget};

#[derive(Debug, Clone, PartialEq)]
pub struct RiskScorer {
    scoring: ScoringConfig,
    complexity_threshold: u32,
    nesting_threshold: u32,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default(), &ThresholdsConfig::default())
    }
}

impl RiskScorer {
    pub fn new(scoring: ScoringConfig, thresholds: &ThresholdsConfig) -> Self {
        Self {
            scoring,
            complexity_threshold: thresholds.complexity,
            nesting_threshold: thresholds.nesting,
        }
    }

    pub fn from_config(config: &RiskmapConfig) -> Self {
        Self::new(config.scoring.clone(), &config.thresholds)
    }

    /// Score one function of a file. Reasons keep the heuristic order.
    pub fn score_function(
        &self,
        name: &str,
        structure: &ModuleStructure,
        metrics: &MetricsReport,
    ) -> RiskEntry {
        let triggered = [
            (
                self.is_highly_complex(name, metrics),
                self.scoring.complexity_weight,
                RiskReason::HighComplexity,
            ),
            (
                metrics.nesting_depth > self.nesting_threshold,
                self.scoring.nesting_weight,
                RiskReason::DeepNesting,
            ),
            (
                structure.imports_module(&self.scoring.framework_modules),
                self.scoring.framework_weight,
                RiskReason::FrameworkEntryPoint,
            ),
        ];

        let (score, reasons) = triggered
            .into_iter()
            .filter(|(hit, _, _)| *hit)
            .fold((0.0, Vec::new()), |(score, mut reasons), (_, weight, reason)| {
                reasons.push(reason);
                (score + weight, reasons)
            });

        RiskEntry {
            risk_score: round2(f64::min(score, 1.0)),
            reasons,
        }
    }

    fn is_highly_complex(&self, name: &str, metrics: &MetricsReport) -> bool {
        metrics
            .cyclomatic_complexity
            .functions
            .iter()
            .any(|block| block.name == name && block.complexity > self.complexity_threshold)
    }

    /// Score every function and method of one file.
    pub fn score_file(&self, structure: &ModuleStructure, metrics: &MetricsReport) -> FileRisks {
        structure
            .flattened_functions()
            .into_keys()
            .map(|name| (name.to_string(), self.score_function(name, structure, metrics)))
            .collect()
    }

    /// Build the project-wide risk map. Files that failed analysis are left out.
    pub fn generate_risk_map(&self, analysis: &AnalysisResult) -> RiskMap {
        analysis
            .iter()
            .filter_map(|(path, report)| match report {
                FileReport::Analyzed { structure, metrics } => {
                    Some((path.clone(), self.score_file(structure, metrics)))
                }
                FileReport::Failed { error } => {
                    log::debug!("Skipping {path} in risk map: {error}");
                    None
                }
            })
            .collect()
    }
}

/// Risk map with the default weights and thresholds.
pub fn generate_risk_map(analysis: &AnalysisResult) -> RiskMap {
    RiskScorer::default().generate_risk_map(analysis)
}
