//! # Application Configuration
//!
//! This module defines the configuration structure for the `flowqa` CLI and
//! the logic for loading it from a YAML file and environment variables.
//!
//! Layers, lowest priority first:
//! 1. Programmatic defaults (processor properties, concurrency).
//! 2. The YAML file: an explicit path, else `config.yml` in the working
//!    directory, else the bundled `config.{QA_PROVIDER}.yml` template.
//! 3. `FLOWQA_...` environment variables (e.g. `FLOWQA_PROVIDER__API_URL`).

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use flowqa::{
    constants::{DEFAULT_CONCURRENCY, DEFAULT_PARAGRAPH, DEFAULT_QUESTION},
    ProcessorSettings, ProviderConfig,
};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors raised while locating, reading or layering the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    NotFound(String),
    #[error("Configuration error: {0}")]
    Layer(#[from] config::ConfigError),
    #[error("Invalid substitution pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Maximum number of records processed at the same time.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// The processor properties.
    #[serde(default)]
    pub processor: ProcessorSettings,
    /// The QA model provider.
    pub provider: ProviderConfig,
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

// Reads a file and substitutes `${VAR}` with environment values.
// `$${VAR}` is left as `${VAR}` so processor properties can still reference
// upper-case record attributes. Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;

    let re = Regex::new(r"(?P<escape>\$?)\$\{(?P<var>[A-Z0-9_]+)\}")?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        if caps["escape"].is_empty() {
            env::var(var_name).unwrap_or_default()
        } else {
            format!("${{{var_name}}}")
        }
    });

    Ok(Some(expanded_content.to_string()))
}

/// Picks the main configuration file when no explicit path is given.
fn default_config_path() -> String {
    let user_config_path = "config.yml".to_string();
    if Path::new(&user_config_path).exists() {
        info!("Loading user-defined configuration from '{user_config_path}'.");
        return user_config_path;
    }
    let provider = env::var("QA_PROVIDER").unwrap_or_else(|_| "djl".to_string());
    let fallback_path = format!("{}/config.{provider}.yml", env!("CARGO_MANIFEST_DIR"));
    info!("'{user_config_path}' not found. Falling back to '{fallback_path}' based on QA_PROVIDER='{provider}'.");
    fallback_path
}

/// Loads the application configuration from a file and environment variables.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let main_config_path = match config_path_override {
        Some(path) => path.to_string(),
        None => default_config_path(),
    };

    let main_content = read_and_substitute(&main_config_path)?.ok_or_else(|| {
        ConfigError::NotFound(format!(
            "Main config file not found at '{main_config_path}'. Please create 'config.yml' or set QA_PROVIDER to a bundled template ('djl' or 'huggingface')."
        ))
    })?;

    let settings = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults.
        .set_default("concurrency", DEFAULT_CONCURRENCY as u64)?
        .set_default("processor.question", DEFAULT_QUESTION)?
        .set_default("processor.paragraph", DEFAULT_PARAGRAPH)?
        .set_default("processor.route_errors_to_failure", false)?
        // Layer 2: Main config file.
        .add_source(File::from_str(&main_content, FileFormat::Yaml))
        // Layer 3: Prefixed environment variables for overrides.
        .add_source(
            Environment::with_prefix("FLOWQA")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    Ok(config)
}
