//! Error types for riskmap analysis operations.
//!
//! Errors are split by how far they are allowed to travel:
//!
//! - [`ParseError`]: a source file could not be turned into a structural model.
//!   Recorded per file in the analysis result, never fatal to a run.
//! - [`MetricError`]: a single metric computation failed. Always mapped to the
//!   metric's documented default by the report builder.
//! - [`AnalysisError`]: failures around the core (reading files, loading
//!   configuration, (de)serializing reports). Only these reach the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Why a source file produced no structural model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text is not valid Python.
    #[error("Syntax error: {message} (line {line})")]
    Syntax { message: String, line: usize },

    /// The bytes are not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Brackets, indentation or expression trees nest deeper than the analyzer allows.
    #[error("Nesting limit exceeded: {what} nests {depth} levels deep (limit {limit})")]
    NestingLimit {
        what: &'static str,
        depth: usize,
        limit: usize,
    },

    /// The file could not be read at all.
    #[error("Read error: {0}")]
    Read(String),
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, line: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            line,
        }
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding(message.into())
    }

    pub fn read(error: &std::io::Error) -> Self {
        Self::Read(error.to_string())
    }
}

/// A metric computation that did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricError {
    #[error("cannot parse source for {metric}: {reason}")]
    Unparseable { metric: &'static str, reason: String },

    #[error("{metric} is undefined: {reason}")]
    Undefined { metric: &'static str, reason: String },
}

impl MetricError {
    pub fn unparseable(metric: &'static str, reason: impl ToString) -> Self {
        Self::Unparseable {
            metric,
            reason: reason.to_string(),
        }
    }

    pub fn undefined(metric: &'static str, reason: impl Into<String>) -> Self {
        Self::Undefined {
            metric,
            reason: reason.into(),
        }
    }
}

/// Failures outside the per-file analysis core.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Invalid analysis report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("File discovery failed: {0}")]
    Walk(#[from] ignore::Error),
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for operations around the analysis core.
pub type Result<T> = std::result::Result<T, AnalysisError>;
