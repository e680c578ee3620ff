use crate::{
    constants::NO_ANSWER_ERROR, errors::QaError, providers::qa::QaProvider, types::Prediction,
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;
use tracing::{debug, info};

// --- DJL Serving request structure ---

#[derive(Serialize, Debug)]
struct DjlQaRequest<'a> {
    question: &'a str,
    paragraph: &'a str,
}

// --- DJL Serving provider implementation ---

/// A provider for a BERT QA model hosted by DJL Serving.
///
/// Predictions are posted to `{base_url}/predictions/{model}`; the model
/// answers with the predicted span as plain text or as a JSON string.
#[derive(Clone, Debug)]
pub struct DjlServingProvider {
    client: ReqwestClient,
    base_url: String,
    model: String,
}

impl DjlServingProvider {
    /// Creates a new `DjlServingProvider`.
    pub fn new(base_url: String, model: String) -> Result<Self, QaError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(QaError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    fn predictions_url(&self) -> String {
        format!("{}/predictions/{}", self.base_url, self.model)
    }
}

/// Turns a DJL Serving response body into a prediction.
///
/// An empty span is a soft error; a JSON object without a string `answer`
/// is rejected.
fn parse_answer(body: &str) -> Result<Prediction, QaError> {
    let answer = match serde_json::from_str::<Value>(body) {
        Ok(Value::String(answer)) => answer,
        Ok(Value::Object(map)) => match map.get("answer").and_then(Value::as_str) {
            Some(answer) => answer.to_string(),
            None => {
                return Err(QaError::AiApi(format!(
                    "DJL Serving response has no answer: {body}"
                )))
            }
        },
        _ => body.to_string(),
    };

    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(Prediction {
            prediction: String::new(),
            error: NO_ANSWER_ERROR.to_string(),
        });
    }
    Ok(Prediction::answer(answer))
}

#[async_trait]
impl QaProvider for DjlServingProvider {
    async fn predict(&self, question: &str, paragraph: &str) -> Result<Prediction, QaError> {
        let request_body = DjlQaRequest {
            question,
            paragraph,
        };
        debug!(payload = ?request_body, "--> Sending request to DJL Serving");

        let response = self
            .client
            .post(self.predictions_url())
            .json(&request_body)
            .send()
            .await
            .map_err(QaError::AiRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(QaError::AiApi(error_text));
        }

        let body = response.text().await.map_err(QaError::AiDeserialization)?;
        debug!("<-- Answer from DJL Serving: {}", body);

        parse_answer(&body)
    }

    /// Checks that the model server is up before records are processed.
    async fn warm_up(&self) -> Result<(), QaError> {
        let url = format!("{}/ping", self.base_url);
        info!("Checking DJL Serving health at {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(QaError::AiRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(QaError::AiApi(format!(
                "model server is not healthy: {error_text}"
            )));
        }
        Ok(())
    }
}
