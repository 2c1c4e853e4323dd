use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::{
    config::GeneratorConfig,
    core::endpoint::CompletionEndpoint,
    error::{PlannerError, Result},
    types::CompletionRequest,
};

/// Chat-completions client. One HTTP request per call, no retry loop.
#[derive(Clone, Debug)]
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PlannerError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            http,
        })
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        Self::new(config.api_key(), config.base_url(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn chat_completion(&self, body: &Value) -> Result<Value> {
        let request_url = build_chat_url(&self.base_url);

        let response = self
            .http
            .post(&request_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    PlannerError::Timeout(format!("completion request timed out: {err}"))
                } else {
                    PlannerError::Http(err.to_string())
                }
            })?;

        let status = response.status();
        let headers = response.headers().clone();
        let response_text = response
            .text()
            .await
            .map_err(|err| PlannerError::Http(format!("Failed to read response: {err}")))?;

        debug!(
            target: "itinerary::client",
            status = status.as_u16(),
            bytes = response_text.len(),
            "completion response received"
        );

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = headers
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
                .unwrap_or(1)
                .max(1);
            return Err(PlannerError::RateLimit { retry_after });
        }

        if !status.is_success() {
            let api_message = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|json| {
                    json.get("error")
                        .and_then(|error| error.get("message"))
                        .and_then(|value| value.as_str())
                        .map(|s| s.to_string())
                })
                .unwrap_or(response_text);

            return Err(PlannerError::Api {
                status: status.as_u16(),
                message: api_message,
            });
        }

        let response_json: Value = serde_json::from_str(&response_text).map_err(|err| {
            PlannerError::InvalidResponse(format!("Failed to parse JSON envelope: {err}"))
        })?;

        if let Some(error) = response_json.get("error") {
            let error_message = error
                .get("message")
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| error.to_string());
            return Err(PlannerError::InvalidResponse(format!(
                "API error: {}",
                error_message
            )));
        }

        Ok(response_json)
    }
}

#[async_trait]
impl CompletionEndpoint for OpenAIClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>> {
        let response = self.chat_completion(&request.to_body()).await?;
        first_choice_content(&response)
    }
}

/// Content of the first choice's message. Errors when there are no choices.
pub(crate) fn first_choice_content(response: &Value) -> Result<Option<String>> {
    let choices = response
        .get("choices")
        .and_then(|value| value.as_array())
        .ok_or_else(|| {
            PlannerError::InvalidResponse(
                "Missing 'choices' array in completion response".to_string(),
            )
        })?;

    let first_choice = choices.first().ok_or_else(|| {
        PlannerError::InvalidResponse("Completion response contained no choices".to_string())
    })?;

    Ok(first_choice
        .get("message")
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(|s| s.to_string()))
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}
