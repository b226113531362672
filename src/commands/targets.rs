use crate::config::{load_config_file, RiskmapConfig};
use crate::core::{AnalysisResult, RiskMap};
use crate::io::{read_json, write_json};
use crate::risk::select_test_targets;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct TargetsConfig {
    pub analysis: PathBuf,
    pub risks: PathBuf,
    pub threshold: Option<f64>,
    pub context: bool,
    pub config: Option<PathBuf>,
}

pub fn handle_targets(config: TargetsConfig) -> Result<()> {
    let settings = match &config.config {
        Some(path) => load_config_file(path).context("Failed to load configuration")?,
        None => RiskmapConfig::default(),
    };
    let threshold = config
        .threshold
        .unwrap_or(settings.thresholds.target_risk);

    let analysis: AnalysisResult = read_json(&config.analysis)
        .with_context(|| format!("Failed to read {}", config.analysis.display()))?;
    let risk_map: RiskMap = read_json(&config.risks)
        .with_context(|| format!("Failed to read {}", config.risks.display()))?;

    let targets = select_test_targets(&analysis, &risk_map, threshold);

    if config.context {
        for target in &targets {
            println!("# {}\n{}\n", target.file, target.prompt_context());
        }
        Ok(())
    } else {
        write_json(&targets, None).context("Failed to write test targets")
    }
}
