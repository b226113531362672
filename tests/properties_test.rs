//! Property-based tests for metric and scoring invariants.

mod common;

use common::{analyze_snippet, nested_ifs};
use proptest::prelude::*;
use riskmap::core::{BlockComplexity, ComplexitySummary, ImportRecord};
use riskmap::{MetricsEngine, MetricsReport, ModuleStructure, RiskReason, RiskScorer};

/// One decision-point statement per strategy value, none nesting a function.
fn decision() -> impl Strategy<Value = (&'static str, u32)> {
    prop_oneof![
        Just(("    if x:\n        pass\n", 1)),
        Just(("    for i in x:\n        pass\n", 1)),
        Just(("    while x:\n        break\n", 1)),
        Just(("    y = x and x\n", 1)),
        Just(("    y = x or x or x\n", 2)),
        Just(("    y = 1 if x else 2\n", 1)),
        Just(("    assert x\n", 1)),
        Just(("    y = [i for i in x if i]\n", 2)),
        Just(("    try:\n        pass\n    except ValueError:\n        pass\n", 1)),
    ]
}

fn structure(framework: bool) -> ModuleStructure {
    let mut structure = ModuleStructure::new("p.py");
    if framework {
        structure.imports.push(ImportRecord {
            module: "pydantic".to_string(),
            name: Some("BaseModel".to_string()),
            alias: None,
        });
    }
    structure
}

fn metrics(complexity: u32, nesting_depth: u32) -> MetricsReport {
    MetricsReport {
        cyclomatic_complexity: ComplexitySummary {
            functions: vec![BlockComplexity::new("f", complexity)],
            ..ComplexitySummary::default()
        },
        maintainability_index: 0.0,
        nesting_depth,
    }
}

proptest! {
    /// Property: N decision points in a flat function give complexity N + 1
    #[test]
    fn prop_complexity_is_decisions_plus_one(decisions in prop::collection::vec(decision(), 0..12)) {
        let mut code = String::from("def f(x):\n");
        let mut expected = 1;
        for (line, count) in &decisions {
            code.push_str(line);
            expected += count;
        }
        code.push_str("    return x\n");

        let summary = MetricsEngine::new().cyclomatic("f.py", &code).unwrap();
        prop_assert_eq!(summary.functions.len(), 1);
        prop_assert_eq!(summary.functions[0].complexity, expected);
    }

    /// Property: nesting depth follows the chain of nested bodies
    #[test]
    fn prop_nesting_depth_tracks_nested_ifs(depth in 0usize..30) {
        let report = analyze_snippet("n.py", &nested_ifs(depth));
        let metrics = report.metrics().unwrap();
        prop_assert_eq!(metrics.nesting_depth as usize, depth + 1);
    }

    /// Property: scores stay in range, equal the capped rounded sum, and keep reason order
    #[test]
    fn prop_risk_score_range_and_reason_order(
        complexity in 1u32..60,
        nesting in 0u32..10,
        framework in any::<bool>(),
    ) {
        let entry = RiskScorer::default().score_function("f", &structure(framework), &metrics(complexity, nesting));

        let mut expected_reasons = Vec::new();
        let mut expected = 0.0;
        if complexity > 10 {
            expected_reasons.push(RiskReason::HighComplexity);
            expected += 0.4;
        }
        if nesting > 3 {
            expected_reasons.push(RiskReason::DeepNesting);
            expected += 0.2;
        }
        if framework {
            expected_reasons.push(RiskReason::FrameworkEntryPoint);
            expected += 0.2;
        }

        prop_assert!((0.0..=1.0).contains(&entry.risk_score));
        prop_assert!((entry.risk_score - f64::min(expected, 1.0)).abs() < 1e-9);
        prop_assert_eq!(entry.reasons, expected_reasons);
    }

    /// Property: maintainability index always lies in 0..=100
    #[test]
    fn prop_maintainability_in_range(decisions in prop::collection::vec(decision(), 0..20), comments in 0usize..10) {
        let mut code = "# note\n".repeat(comments);
        code.push_str("def f(x):\n");
        for (line, _) in &decisions {
            code.push_str(line);
        }
        code.push_str("    return x + 1\n");

        let mi = MetricsEngine::new().maintainability("m.py", &code).unwrap();
        prop_assert!((0.0..=100.0).contains(&mi));
    }
}

#[test]
fn test_flat_module_nesting_at_most_one() {
    for code in ["x = 1\n", "print('hi')\n", "if x:\n    y = 2\n", "with open(p) as f:\n    f.read()\n"] {
        let report = analyze_snippet("flat.py", code);
        assert!(report.metrics().unwrap().nesting_depth <= 1, "{code}");
    }
}

#[test]
fn test_function_if_for_chain_is_at_least_three() {
    let code = "def f(x):\n    if x:\n        for i in x:\n            print(i)\n";
    let report = analyze_snippet("chain.py", code);
    assert!(report.metrics().unwrap().nesting_depth >= 3);
}
