//! End-to-end tests: source text in, analysis and risk map out.

mod common;

use common::{analyze_snippet, analyze_snippets, create_project, nested_ifs};
use indoc::indoc;
use pretty_assertions::assert_eq;
use riskmap::commands::analyze_project;
use riskmap::{generate_risk_map, select_test_targets, FileReport, RiskReason, RiskmapConfig};
use serde_json::json;

const API_MODULE: &str = indoc! {r#"
    from fastapi import FastAPI

    def f(a, b):
        if a:
            return b
"#};

#[test]
fn test_framework_import_scores_point_two() {
    let analysis = analyze_snippets(&[("api.py", API_MODULE)]);

    let metrics = analysis["api.py"].metrics().expect("metrics");
    assert_eq!(metrics.nesting_depth, 2);
    assert_eq!(metrics.cyclomatic_complexity.functions[0].complexity, 2);

    let risk_map = generate_risk_map(&analysis);
    let entry = &risk_map["api.py"]["f"];
    assert_eq!(entry.risk_score, 0.2);
    assert_eq!(entry.reasons, vec![RiskReason::FrameworkEntryPoint]);
}

#[test]
fn test_analysis_json_shape() {
    let report = analyze_snippet("api.py", API_MODULE);
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(
        value["structure"],
        json!({
            "file": "api.py",
            "functions": [{"name": "f", "args": ["a", "b"], "docstring": null}],
            "classes": [],
            "imports": [{"module": "fastapi", "name": "FastAPI", "alias": null}],
        })
    );
    assert_eq!(
        value["metrics"]["cyclomatic_complexity"],
        json!({
            "average": 2.0,
            "max": 2.0,
            "functions": [{"name": "f", "complexity": 2, "rank": "A"}],
        })
    );
    assert_eq!(value["metrics"]["nesting_depth"], json!(2));
}

#[test]
fn test_zero_functions_report() {
    let report = analyze_snippet("consts.py", "import os\nLIMIT = 3\n");
    let summary = &report.metrics().expect("metrics").cyclomatic_complexity;
    assert_eq!(summary.average, 0.0);
    assert_eq!(summary.max, 0.0);
    assert!(summary.functions.is_empty());
}

#[test]
fn test_parse_failure_has_only_error_and_no_risks() {
    let analysis = analyze_snippets(&[
        ("good.py", "def ok():\n    return 1\n"),
        ("bad.py", "def broken(:\n    pass\n"),
    ]);

    let value = serde_json::to_value(&analysis["bad.py"]).unwrap();
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["error"]);

    let risk_map = generate_risk_map(&analysis);
    assert!(risk_map.contains_key("good.py"));
    assert!(!risk_map.contains_key("bad.py"));
}

#[test]
fn test_deep_nesting_and_complexity_select_target() {
    let mut code = String::from("import uvicorn\n\n");
    code.push_str(&nested_ifs(11));
    let analysis = analyze_snippets(&[("deep.py", code.as_str())]);

    let risk_map = generate_risk_map(&analysis);
    let entry = &risk_map["deep.py"]["f"];
    assert_eq!(entry.risk_score, 0.8);
    assert_eq!(
        entry.reasons,
        vec![
            RiskReason::HighComplexity,
            RiskReason::DeepNesting,
            RiskReason::FrameworkEntryPoint,
        ]
    );

    let targets = select_test_targets(&analysis, &risk_map, 0.5);
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].args, vec!["x"]);
}

#[test]
fn test_pipeline_is_idempotent() {
    let files = [
        ("a.py", API_MODULE),
        (
            "b.py",
            indoc! {r#"
                class Repo:
                    """Storage."""
                    def get(self, key):
                        return self.data.get(key) or None
            "#},
        ),
        ("c.py", "x = (\n"),
    ];

    let first = analyze_snippets(&files);
    let second = analyze_snippets(&files);
    assert_eq!(
        serde_json::to_string_pretty(&first).unwrap(),
        serde_json::to_string_pretty(&second).unwrap()
    );
    assert_eq!(
        serde_json::to_string_pretty(&generate_risk_map(&first)).unwrap(),
        serde_json::to_string_pretty(&generate_risk_map(&second)).unwrap()
    );
}

#[test]
fn test_risk_map_from_persisted_analysis() {
    let analysis = analyze_snippets(&[("a.py", API_MODULE), ("c.py", "x = (\n")]);
    let json = serde_json::to_string_pretty(&analysis).unwrap();
    let reloaded: riskmap::AnalysisResult = serde_json::from_str(&json).unwrap();

    assert!(matches!(reloaded["c.py"], FileReport::Failed { .. }));
    assert_eq!(generate_risk_map(&reloaded), generate_risk_map(&analysis));
}

#[test]
fn test_analyze_project_on_disk() {
    let project = create_project(&[
        ("svc/app.py", API_MODULE),
        ("svc/test_app.py", "def test_f():\n    assert True\n"),
        ("svc/broken.py", "def broken(:\n"),
        ("svc/latin.py", ""),
        (".cache/gen.py", "x = 1\n"),
    ]);
    std::fs::write(project.path().join("svc/latin.py"), b"s = '\xe9'\n").unwrap();

    let analysis = analyze_project(project.path(), &RiskmapConfig::default()).unwrap();

    let names: Vec<_> = analysis
        .keys()
        .map(|k| k.rsplit('/').next().unwrap_or(k))
        .collect();
    assert_eq!(names, vec!["app.py", "broken.py", "latin.py"]);

    let errors: Vec<_> = analysis.values().filter_map(|r| r.error()).collect();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].starts_with("Syntax error:"));
    assert!(errors[1].starts_with("Encoding error:"));
}

#[test]
fn test_closure_complexity_does_not_leak_into_same_named_function() {
    let branches: String = (0..12)
        .map(|i| format!("        if value == {i}:\n            return {i}\n"))
        .collect();
    let code = format!(
        "def helper(x):\n    return x\n\ndef build():\n    def helper(value):\n{branches}        return None\n    return helper\n"
    );
    let analysis = analyze_snippets(&[("closures.py", code.as_str())]);

    let summary = &analysis["closures.py"].metrics().expect("metrics").cyclomatic_complexity;
    let blocks: Vec<_> = summary
        .functions
        .iter()
        .map(|b| (b.name.as_str(), b.complexity))
        .collect();
    assert_eq!(blocks, vec![("helper", 1), ("build", 1)]);

    let risk_map = generate_risk_map(&analysis);
    assert_eq!(risk_map["closures.py"]["helper"].risk_score, 0.0);
    assert!(risk_map["closures.py"]["helper"].reasons.is_empty());
}

#[test]
fn test_pathological_file_does_not_affect_its_neighbours() {
    let runaway = format!("x = {}y\n", "not ".repeat(300_000));
    let deep = format!("x = {}y\n", "- ".repeat(3_000));
    let analysis = analyze_snippets(&[
        ("runaway.py", runaway.as_str()),
        ("deep.py", deep.as_str()),
        ("api.py", API_MODULE),
    ]);

    for path in ["runaway.py", "deep.py"] {
        assert!(analysis[path]
            .error()
            .is_some_and(|e| e.starts_with("Nesting limit exceeded:")));
    }
    assert!(analysis["api.py"].metrics().is_some());
    let risk_map = generate_risk_map(&analysis);
    assert_eq!(risk_map.keys().collect::<Vec<_>>(), vec!["api.py"]);
}
