// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod complexity;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod metrics;
pub mod risk;

// Re-export commonly used types
pub use crate::core::{
    AnalysisResult, BlockComplexity, ClassRecord, ComplexitySummary, FileReport, FileRisks,
    FunctionRecord, ImportRecord, MetricsReport, ModuleStructure, Rank, RiskEntry, RiskMap,
    RiskReason, SourceUnit,
};

pub use crate::core::metrics::{calculate_average_complexity, find_max_complexity};

pub use crate::errors::{AnalysisError, MetricError, ParseError};

pub use crate::analyzers::batch::{analyze_files, BatchAnalyzer};
pub use crate::analyzers::python::PythonAnalyzer;

pub use crate::complexity::MetricsEngine;

pub use crate::config::{load_config, RiskmapConfig};

pub use crate::io::walker::{find_python_files, FileWalker};

pub use crate::risk::{generate_risk_map, select_test_targets, RiskScorer, TestTarget};
