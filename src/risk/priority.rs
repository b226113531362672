//! Picks the functions most in need of tests and renders what a test
//! generator needs to know about each.

use crate::core::{AnalysisResult, FunctionRecord, RiskMap, RiskReason};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TestTarget {
    pub file: String,
    pub name: String,
    pub args: Vec<String>,
    pub docstring: Option<String>,
    pub risk_score: f64,
    pub reasons: Vec<RiskReason>,
}

impl TestTarget {
    /// The function description handed to a test generator.
    pub fn prompt_context(&self) -> String {
        let args = join_or_none(self.args.iter());
        let reasons = join_or_none(self.reasons.iter());
        let docstring = self
            .docstring
            .as_deref()
            .filter(|doc| !doc.is_empty())
            .unwrap_or("No docstring provided.");

        format!(
            "Function name: {}\nArguments: {args}\nDocstring: {docstring}\n\nRisk factors: {reasons}",
            self.name
        )
    }
}

fn join_or_none<T: ToString>(items: impl Iterator<Item = T>) -> String {
    let joined = items.map(|item| item.to_string()).collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "None".to_string()
    } else {
        joined
    }
}

/// Every scored function with `risk_score >= threshold`, in risk map order.
///
/// Function metadata comes from the file's structure, flattened the same way
/// the risk map was built. A name missing from the structure gets no
/// arguments and no docstring.
pub fn select_test_targets(
    analysis: &AnalysisResult,
    risk_map: &RiskMap,
    threshold: f64,
) -> Vec<TestTarget> {
    let mut targets = Vec::new();

    for (file, risks) in risk_map {
        let structure = analysis.get(file).and_then(|report| report.structure());
        let functions = structure
            .map(|s| s.flattened_functions())
            .unwrap_or_default();

        for (name, entry) in risks {
            if entry.risk_score < threshold {
                continue;
            }

            let record: Option<&FunctionRecord> = functions.get(name.as_str()).copied();
            targets.push(TestTarget {
                file: file.clone(),
                name: name.clone(),
                args: record.map(|f| f.args.clone()).unwrap_or_default(),
                docstring: record.and_then(|f| f.docstring.clone()),
                risk_score: entry.risk_score,
                reasons: entry.reasons.clone(),
            });
        }
    }

    log::info!(
        "Selected {} test targets at risk >= {threshold}",
        targets.len()
    );
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FileReport, FileRisks, MetricsReport, ModuleStructure, RiskEntry};
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn entry(score: f64, reasons: Vec<RiskReason>) -> RiskEntry {
        RiskEntry {
            risk_score: score,
            reasons,
        }
    }

    fn fixture() -> (AnalysisResult, RiskMap) {
        let mut structure = ModuleStructure::new("svc.py");
        structure.functions.push(FunctionRecord {
            name: "predict".to_string(),
            args: vec!["model".to_string(), "payload".to_string()],
            docstring: Some("Run inference.".to_string()),
        });
        structure.functions.push(FunctionRecord {
            name: "helper".to_string(),
            args: vec![],
            docstring: None,
        });

        let mut analysis = AnalysisResult::new();
        analysis.insert(
            "svc.py".to_string(),
            FileReport::Analyzed {
                structure,
                metrics: MetricsReport::default(),
            },
        );

        let mut risks = FileRisks::new();
        risks.insert(
            "predict".to_string(),
            entry(
                0.6,
                vec![RiskReason::HighComplexity, RiskReason::FrameworkEntryPoint],
            ),
        );
        risks.insert("helper".to_string(), entry(0.2, vec![RiskReason::FrameworkEntryPoint]));
        risks.insert("ghost".to_string(), entry(0.5, vec![]));

        let mut risk_map = RiskMap::new();
        risk_map.insert("svc.py".to_string(), risks);
        (analysis, risk_map)
    }

    #[test]
    fn test_threshold_is_inclusive_and_order_kept() {
        let (analysis, risk_map) = fixture();
        let targets = select_test_targets(&analysis, &risk_map, 0.5);
        let names: Vec<_> = targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["predict", "ghost"]);
        assert_eq!(targets[0].args, vec!["model", "payload"]);
        assert_eq!(targets[1].args, Vec::<String>::new());
        assert_eq!(targets[1].docstring, None);
    }

    #[test]
    fn test_prompt_context() {
        let (analysis, risk_map) = fixture();
        let targets = select_test_targets(&analysis, &risk_map, 0.0);

        assert_eq!(
            targets[0].prompt_context(),
            indoc! {"
                Function name: predict
                Arguments: model, payload
                Docstring: Run inference.

                Risk factors: high cyclomatic complexity, core inference route or API handler"}
        );
        assert_eq!(
            targets[2].prompt_context(),
            indoc! {"
                Function name: ghost
                Arguments: None
                Docstring: No docstring provided.

                Risk factors: None"}
        );
    }
}
