use thiserror::Error;

/// Custom error types for the processor and its inference providers.
#[derive(Error, Debug)]
pub enum QaError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to the QA model server: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize QA model server response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("QA model server returned an error: {0}")]
    AiApi(String),
    #[error("Property '{name}' is invalid: {reason}")]
    InvalidProperty { name: String, reason: String },
    #[error("Template error: {0}")]
    Template(String),
    #[error("Unsupported QA provider: {0}")]
    UnsupportedProvider(String),
    #[error("Missing provider setting: {0}")]
    MissingProviderSetting(String),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}
