use crate::{
    constants::NO_ANSWER_ERROR, errors::QaError, providers::qa::QaProvider, types::Prediction,
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::debug;

// --- Hugging Face question-answering request and response structures ---

#[derive(Serialize, Debug)]
struct HfQaRequest<'a> {
    inputs: HfQaInputs<'a>,
}

#[derive(Serialize, Debug)]
struct HfQaInputs<'a> {
    question: &'a str,
    context: &'a str,
}

#[derive(Deserialize, Debug)]
struct HfQaAnswer {
    answer: String,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    start: usize,
    #[serde(default)]
    end: usize,
}

// Endpoints return either a single answer or a ranked list of answers.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum HfQaResponse {
    Single(HfQaAnswer),
    Ranked(Vec<HfQaAnswer>),
}

impl HfQaResponse {
    fn best(self) -> Option<HfQaAnswer> {
        match self {
            HfQaResponse::Single(answer) => Some(answer),
            HfQaResponse::Ranked(answers) => answers.into_iter().next(),
        }
    }
}

// --- Hugging Face provider implementation ---

/// A provider for a question-answering model behind the Hugging Face
/// inference API (or any endpoint speaking the same protocol).
#[derive(Clone, Debug)]
pub struct HuggingFaceProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
}

impl HuggingFaceProvider {
    /// Creates a new `HuggingFaceProvider`.
    pub fn new(api_url: String, api_key: Option<String>) -> Result<Self, QaError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(QaError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }
}

#[async_trait]
impl QaProvider for HuggingFaceProvider {
    async fn predict(&self, question: &str, paragraph: &str) -> Result<Prediction, QaError> {
        let request_body = HfQaRequest {
            inputs: HfQaInputs {
                question,
                context: paragraph,
            },
        };
        debug!(payload = ?request_body, "--> Sending request to Hugging Face QA endpoint");

        let mut request_builder = self.client.post(&self.api_url);
        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        let response = request_builder
            .json(&request_body)
            .send()
            .await
            .map_err(QaError::AiRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(QaError::AiApi(error_text));
        }

        let hf_response: HfQaResponse = response
            .json()
            .await
            .map_err(QaError::AiDeserialization)?;

        let Some(best) = hf_response.best() else {
            return Err(QaError::AiApi(
                "QA endpoint returned no answers".to_string(),
            ));
        };
        debug!(
            score = best.score,
            start = best.start,
            end = best.end,
            "<-- Answer from Hugging Face: {}",
            best.answer
        );

        let answer = best.answer.trim();
        if answer.is_empty() {
            return Ok(Prediction {
                prediction: String::new(),
                error: NO_ANSWER_ERROR.to_string(),
            });
        }
        Ok(Prediction::answer(answer))
    }
}
