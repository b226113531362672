use crate::analyzers::batch::BatchAnalyzer;
use crate::config::{load_config, RiskmapConfig};
use crate::core::AnalysisResult;
use crate::io::{find_python_files, write_json};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub out: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub no_parallel: bool,
    pub jobs: usize,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let mut settings = load_config(config.config.as_deref(), &config.path)
        .context("Failed to load configuration")?;

    if config.no_parallel {
        settings.parallel.enabled = false;
    }
    if config.jobs > 0 {
        settings.parallel.max_concurrency = Some(config.jobs);
    }

    let result = analyze_project(&config.path, &settings)?;
    let failed = result.values().filter(|r| r.error().is_some()).count();
    log::info!(
        "Analyzed {} files ({} failed)",
        result.len(),
        failed
    );

    write_json(&result, config.out.as_deref()).context("Failed to write analysis")?;
    Ok(())
}

/// Discover and analyze every Python file under `root`.
pub fn analyze_project(root: &Path, settings: &RiskmapConfig) -> Result<AnalysisResult> {
    let files = find_python_files(root, &settings.discovery)
        .with_context(|| format!("Failed to list Python files under {}", root.display()))?;
    Ok(BatchAnalyzer::from_config(settings).analyze_files(&files))
}
