use crate::core::{BlockComplexity, ComplexitySummary};

/// Round to two decimal places, the precision every reported float uses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn calculate_average_complexity(blocks: &[BlockComplexity]) -> f64 {
    if blocks.is_empty() {
        return 0.0;
    }

    let total: u32 = blocks.iter().map(|b| b.complexity).sum();
    round2(total as f64 / blocks.len() as f64)
}

pub fn find_max_complexity(blocks: &[BlockComplexity]) -> u32 {
    blocks.iter().map(|b| b.complexity).max().unwrap_or(0)
}

pub fn summarize_complexity(blocks: Vec<BlockComplexity>) -> ComplexitySummary {
    ComplexitySummary {
        average: calculate_average_complexity(&blocks),
        max: find_max_complexity(&blocks) as f64,
        functions: blocks,
    }
}
