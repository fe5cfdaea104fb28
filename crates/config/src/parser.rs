use crate::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

#[instrument(skip(path))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DecayVizConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    debug!("Config file content length: {} bytes", content.len());
    let config = parse_config(&content)?;

    info!("Configuration loaded successfully");
    Ok(config)
}

/// Parse a YAML document after environment variable substitution
pub fn parse_config(content: &str) -> Result<DecayVizConfig> {
    let substituted = substitution::substitute_env_vars(content)?;
    debug!("Environment variable substitution completed");

    // An empty file is a config with every section defaulted
    if substituted.trim().is_empty() {
        return Ok(DecayVizConfig::default());
    }

    serde_yaml::from_str(&substituted).with_context(|| "Failed to parse YAML configuration")
}

/// Every section filled with its defaults
#[instrument]
pub fn generate_default_config() -> DecayVizConfig {
    DecayVizConfig {
        service: Some(ServiceConfig::default()),
        api: Some(ApiConfig::default()),
        render: Some(RenderConfig::default()),
        evolution: Some(EvolutionConfig::default()),
        logging: Some(LoggingConfig::default()),
        metrics: Some(MetricsConfig::default()),
    }
}

#[instrument]
pub fn save_config<P: AsRef<Path> + std::fmt::Debug>(config: &DecayVizConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    let yaml = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration to YAML")?;

    fs::write(path, yaml).with_context(|| format!("Failed to write config file: {:?}", path))?;

    info!("Configuration saved successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::TimeUnit;
    use std::io::Write;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decayviz.yaml");

        save_config(&generate_default_config(), &path).unwrap();
        let loaded = load_config(&path).unwrap();

        assert_eq!(loaded.service().port, 8000);
        assert_eq!(loaded.evolution().default_time_unit, TimeUnit::Days);
        assert!(validate_config(&loaded).defaults_applied.is_empty());
    }

    #[test]
    fn test_load_with_env_substitution() {
        std::env::set_var("DECAYVIZ_PARSER_PORT", "8123");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "service:\n  port: ${{DECAYVIZ_PARSER_PORT}}").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.service().port, 8123);
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = load_config(file.path()).unwrap();
        assert!(config.render.is_none());
    }

    #[test]
    fn test_missing_file_fails() {
        let err = load_config("/nonexistent/decayviz.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_malformed_yaml_fails() {
        assert!(parse_config("service: [unterminated").is_err());
        assert!(parse_config("service:\n  port: not-a-port\n").is_err());
    }
}
