use std::fs;
use std::path::Path;

use super::core::RiskmapConfig;
use crate::errors::{AnalysisError, Result};

pub const CONFIG_FILE_NAME: &str = ".riskmap.toml";

/// Parse and validate configuration from a TOML string.
pub fn parse_config(contents: &str) -> std::result::Result<RiskmapConfig, String> {
    let config = toml::from_str::<RiskmapConfig>(contents).map_err(|e| e.to_string())?;
    config.scoring.validate()?;
    Ok(config)
}

/// Load configuration from a specific file. A missing or invalid file is an error.
pub fn load_config_file(path: &Path) -> Result<RiskmapConfig> {
    let contents = fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
    let config = parse_config(&contents).map_err(|message| AnalysisError::config(path, message))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Resolve the configuration for a run.
///
/// An explicit `config_path` must load. Otherwise `.riskmap.toml` in `root`
/// is used when present, and the defaults when it is not.
pub fn load_config(config_path: Option<&Path>, root: &Path) -> Result<RiskmapConfig> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    let candidate = root.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        load_config_file(&candidate)
    } else {
        log::debug!(
            "No {} in {}. Using default config.",
            CONFIG_FILE_NAME,
            root.display()
        );
        Ok(RiskmapConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config(""), Ok(RiskmapConfig::default()));
    }

    #[test]
    fn test_defaults_match_scoring_rules() {
        let config = RiskmapConfig::default();
        assert_eq!(config.thresholds.complexity, 10);
        assert_eq!(config.thresholds.nesting, 3);
        assert_eq!(config.thresholds.nesting_limit, 100);
        assert_eq!(config.thresholds.target_risk, 0.5);
        assert_eq!(config.scoring.complexity_weight, 0.4);
        assert_eq!(config.scoring.nesting_weight, 0.2);
        assert_eq!(config.scoring.framework_weight, 0.2);
        assert_eq!(
            config.scoring.framework_modules,
            vec!["fastapi", "pydantic", "uvicorn"]
        );
        assert!(config.discovery.exclude_tests);
        assert!(config.discovery.exclude_hidden);
        assert!(config.parallel.enabled);
        assert_eq!(config.parallel.max_concurrency, None);
    }

    #[test]
    fn test_partial_sections_keep_remaining_defaults() {
        let config = parse_config(indoc! {r#"
            [thresholds]
            complexity = 15

            [scoring]
            framework_modules = ["flask"]

            [parallel]
            enabled = false
        "#})
        .unwrap();

        assert_eq!(config.thresholds.complexity, 15);
        assert_eq!(config.thresholds.nesting, 3);
        assert_eq!(config.scoring.framework_modules, vec!["flask"]);
        assert_eq!(config.scoring.complexity_weight, 0.4);
        assert!(!config.parallel.enabled);
        assert!(config.discovery.exclude_tests);
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[thresholds\ncomplexity = ").unwrap();

        let error = load_config(Some(&path), dir.path()).unwrap_err();
        assert!(matches!(error, AnalysisError::Config { .. }));
    }

    #[test]
    fn test_invalid_weight_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[scoring]\ncomplexity_weight = 2.0\n",
        )
        .unwrap();

        let error = load_config(None, dir.path()).unwrap_err();
        assert!(error.to_string().contains("complexity_weight"));
    }

    #[test]
    fn test_root_config_file_is_picked_up() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[thresholds]\ntarget_risk = 0.2\n",
        )
        .unwrap();

        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config.thresholds.target_risk, 0.2);
    }

    #[test]
    fn test_missing_root_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            load_config(None, dir.path()).unwrap(),
            RiskmapConfig::default()
        );
    }

    #[test]
    fn test_explicit_missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load_config(Some(&missing), dir.path()),
            Err(AnalysisError::Io { .. })
        ));
    }
}
