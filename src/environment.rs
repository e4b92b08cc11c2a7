// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One environment section of `config.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub service_url: Option<String>,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub log_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentConfig,
    #[serde(default)]
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    pub fn get_environment() -> String {
        std::env::var("RESPARSER_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Load the section for `environment` from a YAML config file
    pub fn load_from_file(path: &Path, environment: &str) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_yaml(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }
}
