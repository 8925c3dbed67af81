// src/environment.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::service_client::DEFAULT_TIMEOUT_SECS;

pub const API_BASE_ENV: &str = "ALIGNCV_API_BASE";
const LOCAL_API_BASE: &str = "http://127.0.0.1:8000";

/// Deployment-time settings of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientEnvironment {
    pub api_base: String,
    pub download_dir: PathBuf,
    pub timeout_seconds: u64,
}

#[derive(Debug, Default, Deserialize)]
struct EnvironmentSection {
    api_base: Option<String>,
    download_dir: Option<PathBuf>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentSection,
    #[serde(default)]
    production: EnvironmentSection,
}

impl ClientEnvironment {
    /// Load configuration based on environment. `api_base_flag` wins over
    /// `ALIGNCV_API_BASE`, which wins over the file.
    pub fn load(config_path: &Path, api_base_flag: Option<String>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let api_base_override = api_base_flag.or_else(|| std::env::var(API_BASE_ENV).ok());
        Self::load_from(config_path, &environment, api_base_override)
    }

    fn get_environment() -> String {
        std::env::var("ALIGNCV_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Resolve the section named by `environment`, then apply the override.
    pub fn load_from(
        config_path: &Path,
        environment: &str,
        api_base_override: Option<String>,
    ) -> Result<Self> {
        let section = if config_path.exists() {
            let config_content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;

            let config_file: ConfigFile = serde_yaml::from_str(&config_content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;

            match environment {
                "production" => config_file.production,
                _ => config_file.local,
            }
        } else {
            EnvironmentSection::default()
        };

        let is_production = environment == "production";
        let api_base = match api_base_override.or(section.api_base) {
            Some(base) => base,
            None if is_production => anyhow::bail!(
                "No api_base configured for production. Set {} or add it to {}",
                API_BASE_ENV,
                config_path.display()
            ),
            None => LOCAL_API_BASE.to_string(),
        };

        Ok(Self {
            api_base,
            download_dir: Self::resolve_path(
                section
                    .download_dir
                    .unwrap_or_else(|| PathBuf::from("downloads")),
            )?,
            timeout_seconds: section.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    fn resolve_path(path: PathBuf) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path)
        } else {
            // For relative paths, resolve from current working directory
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }
}
