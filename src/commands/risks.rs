use crate::config::{load_config_file, RiskmapConfig};
use crate::core::AnalysisResult;
use crate::io::{read_json, write_json};
use crate::risk::RiskScorer;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct RisksConfig {
    pub analysis: PathBuf,
    pub out: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn handle_risks(config: RisksConfig) -> Result<()> {
    let settings = match &config.config {
        Some(path) => load_config_file(path).context("Failed to load configuration")?,
        None => RiskmapConfig::default(),
    };

    let analysis: AnalysisResult = read_json(&config.analysis)
        .with_context(|| format!("Failed to read {}", config.analysis.display()))?;
    let risk_map = RiskScorer::from_config(&settings).generate_risk_map(&analysis);

    write_json(&risk_map, config.out.as_deref()).context("Failed to write risk map")?;
    Ok(())
}
