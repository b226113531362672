//! Maintainability index, normalised to 0..=100.
//!
//! ```text
//! MI = (171 - 5.2 ln V - 0.23 G - 16.2 ln L + 50 sin(sqrt(2.46 rad(C)))) * 100 / 171
//! ```
//!
//! `V` is the Halstead volume, `G` the total cyclomatic complexity, `L` the
//! number of logical lines and `C` the comment percentage.

use crate::core::ast::child_blocks;
use crate::core::metrics::round2;
use crate::errors::MetricError;
use rustpython_parser::ast::Stmt;

const METRIC: &str = "maintainability index";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaintainabilityInputs {
    pub volume: f64,
    pub complexity: u32,
    pub logical_lines: usize,
    pub comment_percentage: f64,
}

pub fn calculate_maintainability(inputs: &MaintainabilityInputs) -> Result<f64, MetricError> {
    let MaintainabilityInputs {
        volume,
        complexity,
        logical_lines,
        comment_percentage,
    } = *inputs;

    if !volume.is_finite() || !comment_percentage.is_finite() {
        return Err(MetricError::undefined(
            METRIC,
            format!("non-finite input (volume {volume}, comments {comment_percentage}%)"),
        ));
    }
    if volume <= 0.0 || logical_lines == 0 {
        return Ok(100.0);
    }

    let comment_term = 50.0 * (2.46 * comment_percentage.to_radians()).sqrt().sin();
    let raw = 171.0 - 5.2 * volume.ln() - 0.23 * f64::from(complexity)
        - 16.2 * (logical_lines as f64).ln()
        + comment_term;

    Ok(round2((raw * 100.0 / 171.0).clamp(0.0, 100.0)))
}

/// Statements anywhere in the tree, the logical line count.
pub fn count_logical_lines(body: &[Stmt]) -> usize {
    let mut stack: Vec<&Stmt> = body.iter().collect();
    let mut count = 0;

    while let Some(stmt) = stack.pop() {
        count += 1;
        stack.extend(child_blocks(stmt).into_iter().flatten());
    }

    count
}
