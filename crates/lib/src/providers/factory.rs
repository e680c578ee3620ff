//! # QA Provider Factory
//!
//! Centralizes the creation of QA provider instances from configuration so
//! that every consumer (CLI, tests, embedding hosts) builds providers the
//! same way.

use crate::{
    errors::QaError,
    providers::qa::{DjlServingProvider, HuggingFaceProvider, QaProvider},
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default model name registered on DJL Serving for BERT QA.
pub const DEFAULT_DJL_MODEL: &str = "bertqa";

/// A configuration for a specific QA provider instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The type of provider ("djl" or "huggingface").
    pub provider: String,
    /// The base URL (DJL Serving) or full endpoint URL (Hugging Face).
    #[serde(default)]
    pub api_url: Option<String>,
    /// The API key, which can be null for self-hosted model servers.
    #[serde(default)]
    pub api_key: Option<String>,
    /// The model name; only used by DJL Serving.
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Creates a QA provider instance from its configuration.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn QaProvider>, QaError> {
    let provider: Box<dyn QaProvider> = match config.provider.as_str() {
        "djl" => {
            let api_url = required_api_url(config)?;
            let model = config
                .model_name
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DJL_MODEL.to_string());
            info!("Configuring DJL Serving provider at {api_url} for model '{model}'");
            Box::new(DjlServingProvider::new(api_url, model)?)
        }
        "huggingface" => {
            let api_url = required_api_url(config)?;
            info!("Configuring Hugging Face QA provider at {api_url}");
            let api_key = config.api_key.clone().filter(|k| !k.is_empty());
            Box::new(HuggingFaceProvider::new(api_url, api_key)?)
        }
        other => return Err(QaError::UnsupportedProvider(other.to_string())),
    };

    Ok(provider)
}

fn required_api_url(config: &ProviderConfig) -> Result<String, QaError> {
    config
        .api_url
        .as_ref()
        .filter(|url| !url.trim().is_empty())
        .cloned()
        .ok_or_else(|| {
            QaError::MissingProviderSetting(format!(
                "api_url is required for the '{}' provider",
                config.provider
            ))
        })
}
