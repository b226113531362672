//! Per-file analysis fanned out over a rayon pool.
//!
//! Every input yields exactly one [`FileReport`]: read failures, undecodable
//! bytes and syntax errors all become `Failed` entries and never affect the
//! other files. Results keep input order.

use crate::analyzers::python::{decode_source, PythonAnalyzer};
use crate::complexity::MetricsEngine;
use crate::config::{ParallelConfig, RiskmapConfig};
use crate::core::{AnalysisResult, FileReport};
use crate::errors::ParseError;
use rayon::prelude::*;

/// Stack for worker threads. The parser and metric visitors recurse over the
/// syntax tree, and the nesting guards only bound that depth.
const WORKER_STACK_SIZE: usize = 32 * 1024 * 1024;

#[derive(Debug, Clone, Default)]
pub struct BatchAnalyzer {
    parser: PythonAnalyzer,
    metrics: MetricsEngine,
    parallel: ParallelConfig,
}

impl BatchAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RiskmapConfig) -> Self {
        let limits = config.nesting_limits();
        Self {
            parser: PythonAnalyzer::with_limits(limits),
            metrics: MetricsEngine::with_limits(limits),
            parallel: config.parallel.clone(),
        }
    }

    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Structure, then metrics only if the structure was extracted.
    pub fn analyze_source(&self, path: &str, bytes: &[u8]) -> FileReport {
        log::debug!("Analyzing {path}");
        let source = match decode_source(bytes) {
            Ok(source) => source,
            Err(error) => {
                log::warn!("{path}: {error}");
                return FileReport::failed(&error);
            }
        };

        match self.parser.analyze_source(path, source).parsed {
            Ok(structure) => FileReport::Analyzed {
                metrics: self.metrics.compute(path, source),
                structure,
            },
            Err(error) => FileReport::failed(&error),
        }
    }

    /// Analyze in-memory sources keyed by path.
    pub fn analyze_sources<S>(&self, sources: &[(String, S)]) -> AnalysisResult
    where
        S: AsRef<[u8]> + Sync,
    {
        self.fan_out(sources, |(path, bytes)| {
            (path.clone(), self.analyze_source(path, bytes.as_ref()))
        })
    }

    /// Read and analyze each file. An unreadable file is recorded as a read error.
    pub fn analyze_files(&self, paths: &[String]) -> AnalysisResult {
        self.fan_out(paths, |path| {
            let report = match std::fs::read(path) {
                Ok(bytes) => self.analyze_source(path, &bytes),
                Err(e) => {
                    let error = ParseError::read(&e);
                    log::warn!("{path}: {error}");
                    FileReport::failed(&error)
                }
            };
            (path.clone(), report)
        })
    }

    fn fan_out<T, F>(&self, items: &[T], analyze: F) -> AnalysisResult
    where
        T: Sync,
        F: Fn(&T) -> (String, FileReport) + Sync + Send,
    {
        let threads = self.parallel.effective_concurrency();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .stack_size(WORKER_STACK_SIZE)
            .build();

        let reports: Vec<(String, FileReport)> = match pool {
            Ok(pool) => pool.install(|| items.par_iter().map(&analyze).collect()),
            Err(e) => {
                log::warn!("Could not start worker pool ({e}); analyzing sequentially");
                items.iter().map(&analyze).collect()
            }
        };

        log::debug!("Analyzed {} files on {threads} threads", reports.len());
        reports.into_iter().collect()
    }
}

/// Analyze files with the run configuration.
pub fn analyze_files(paths: &[String], config: &RiskmapConfig) -> AnalysisResult {
    BatchAnalyzer::from_config(config).analyze_files(paths)
}
