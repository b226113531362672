pub mod cyclomatic;
pub mod halstead;
pub mod maintainability;
pub mod nesting;

use crate::analyzers::guard::NestingLimits;
use crate::analyzers::python::PythonAnalyzer;
use crate::core::ast::PythonAst;
use crate::core::metrics::summarize_complexity;
use crate::core::{ComplexitySummary, MetricsReport};
use crate::errors::MetricError;
use crate::metrics::LocCounter;

pub use cyclomatic::{calculate_cyclomatic, calculate_module_complexity, ModuleComplexity};
pub use halstead::{calculate_halstead, HalsteadMetrics};
pub use maintainability::{calculate_maintainability, count_logical_lines, MaintainabilityInputs};
pub use nesting::calculate_nesting_depth;

/// Computes a [`MetricsReport`] from source text.
///
/// The engine parses the text itself rather than reusing a structural model,
/// so it also works on files whose structure was never extracted. Each metric
/// is computed on its own: a failure in one leaves the others intact.
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    analyzer: PythonAnalyzer,
}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: NestingLimits) -> Self {
        Self {
            analyzer: PythonAnalyzer::with_limits(limits),
        }
    }

    pub fn compute(&self, path: &str, source: &str) -> MetricsReport {
        let parsed = self.parse(path, source);

        MetricsReport {
            cyclomatic_complexity: or_default(
                path,
                with_ast(&parsed, cyclomatic_summary),
                ComplexitySummary::default,
            ),
            maintainability_index: or_default(
                path,
                with_ast(&parsed, |ast| maintainability_index(source, ast)),
                || 0.0,
            ),
            nesting_depth: or_default(path, with_ast(&parsed, nesting_depth), || 0),
        }
    }

    pub fn cyclomatic(&self, path: &str, source: &str) -> Result<ComplexitySummary, MetricError> {
        with_ast(&self.parse(path, source), cyclomatic_summary)
    }

    pub fn maintainability(&self, path: &str, source: &str) -> Result<f64, MetricError> {
        with_ast(&self.parse(path, source), |ast| maintainability_index(source, ast))
    }

    pub fn nesting(&self, path: &str, source: &str) -> Result<u32, MetricError> {
        with_ast(&self.parse(path, source), nesting_depth)
    }

    fn parse(&self, path: &str, source: &str) -> Result<PythonAst, MetricError> {
        self.analyzer
            .parse(source, path)
            .map_err(|e| MetricError::unparseable("metrics", e))
    }
}

fn with_ast<T>(
    parsed: &Result<PythonAst, MetricError>,
    metric: impl FnOnce(&PythonAst) -> Result<T, MetricError>,
) -> Result<T, MetricError> {
    parsed.as_ref().map_err(Clone::clone).and_then(metric)
}

fn or_default<T>(path: &str, result: Result<T, MetricError>, default: impl FnOnce() -> T) -> T {
    result.unwrap_or_else(|error| {
        log::warn!("{path}: {error}; using default");
        default()
    })
}

pub fn cyclomatic_summary(ast: &PythonAst) -> Result<ComplexitySummary, MetricError> {
    let module = calculate_module_complexity(ast.body());
    Ok(summarize_complexity(module.blocks))
}

pub fn maintainability_index(source: &str, ast: &PythonAst) -> Result<f64, MetricError> {
    let body = ast.body();
    let inputs = MaintainabilityInputs {
        volume: calculate_halstead(source, body).volume(),
        complexity: calculate_module_complexity(body).total(),
        logical_lines: count_logical_lines(body),
        comment_percentage: LocCounter.count_content(source).comment_percentage(),
    };
    calculate_maintainability(&inputs)
}

pub fn nesting_depth(ast: &PythonAst) -> Result<u32, MetricError> {
    Ok(calculate_nesting_depth(ast.body()))
}
