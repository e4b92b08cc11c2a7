// src/core/config_manager.rs
//! Configuration resolution: flags and env vars over `config.yaml` over defaults

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::core::service_client::DEFAULT_SERVICE_URL;
use crate::environment::EnvironmentConfig;

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_LOG_PATH: &str = "/tmp/resparser.log";

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigManager {
    pub environment: String,
    pub service: ServiceConfig,
    pub log_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub url: String,
    /// `None` means requests never time out
    pub timeout_seconds: Option<u64>,
}

/// Values given on the command line (clap already folds in env vars)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub service_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub log_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load all configuration layers
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let environment = EnvironmentConfig::get_environment();
        let file_config = Self::load_file(overrides, &environment)?;
        Ok(Self::resolve(environment, file_config, overrides))
    }

    /// An explicit config path must exist; the default one is optional
    fn load_file(overrides: &ConfigOverrides, environment: &str) -> Result<EnvironmentConfig> {
        match &overrides.config_path {
            Some(path) => EnvironmentConfig::load_from_file(path, environment),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    EnvironmentConfig::load_from_file(&path, environment)
                } else {
                    Ok(EnvironmentConfig::default())
                }
            }
        }
    }

    pub fn resolve(
        environment: String,
        file_config: EnvironmentConfig,
        overrides: &ConfigOverrides,
    ) -> Self {
        let url = overrides
            .service_url
            .clone()
            .or(file_config.service_url)
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

        let timeout_seconds = overrides.timeout_seconds.or(file_config.timeout_seconds);

        let log_path = overrides
            .log_path
            .clone()
            .or(file_config.log_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH));

        Self {
            environment,
            service: ServiceConfig {
                url,
                timeout_seconds,
            },
            log_path,
        }
    }

    pub fn log_summary(&self) {
        info!("Environment: {}", self.environment);
        info!("Parsing service: {}", self.service.url);
        match self.service.timeout_seconds {
            Some(secs) => info!("Request timeout: {}s", secs),
            None => info!("Request timeout: none"),
        }
    }
}
