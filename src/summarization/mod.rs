//! Natural-language student profiles generated by a local Ollama runtime.
//!
//! Each request issues exactly one synchronous call to `/api/generate`: no retries, no caching,
//! and no timeout beyond the transport default. The record is read before the call, so a summary
//! may describe a snapshot that a concurrent update or delete has already superseded.

mod prompt;

pub use prompt::{SUMMARY_MAX_TOKENS, SUMMARY_TEMPERATURE, student_profile_prompt};

use crate::config::Config;
use crate::model::{Student, StudentSummary};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

/// Generated text shorter than this many bytes is treated as a failed generation.
pub const MIN_SUMMARY_LEN: usize = 10;

/// Errors surfaced while generating a student summary.
#[derive(Debug, Error)]
pub enum SummarizationClientError {
    /// HTTP client could not be constructed.
    #[error("Failed to build summarization client: {0}")]
    ClientBuild(String),
    /// Provider could not be reached.
    #[error("Summarization provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
    /// Provider answered with text too short to be a real summary.
    #[error("Generated summary too short ({length} bytes)")]
    TooShort {
        /// Byte length of the rejected text.
        length: usize,
    },
}

/// Request payload passed to the summarization provider.
#[derive(Debug, Clone)]
pub struct SummarizationRequest {
    /// Model identifier understood by the provider.
    pub model: String,
    /// Fully rendered prompt.
    pub prompt: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
}

/// Interface implemented by text-generation providers.
#[async_trait]
pub trait SummarizationClient: Send + Sync {
    /// Generate raw text for the request.
    async fn generate_summary(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationClientError>;
}

/// Builds prompts for student records and validates what the provider returns.
#[derive(Clone)]
pub struct StudentSummarizer {
    client: Arc<dyn SummarizationClient>,
    model: String,
}

impl StudentSummarizer {
    /// Wrap an arbitrary provider.
    pub fn new(client: Arc<dyn SummarizationClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Summarizer backed by the Ollama runtime described in `config`.
    pub fn from_config(config: &Config) -> Result<Self, SummarizationClientError> {
        let client = OllamaSummarizationClient::new(config.ollama_url.clone())?;
        Ok(Self::new(Arc::new(client), config.summary_model.clone()))
    }

    /// Produce a profile summary for an already fetched record.
    pub async fn summarize(
        &self,
        student: &Student,
    ) -> Result<StudentSummary, SummarizationClientError> {
        let request = SummarizationRequest {
            model: self.model.clone(),
            prompt: student_profile_prompt(student),
            temperature: SUMMARY_TEMPERATURE,
            max_tokens: SUMMARY_MAX_TOKENS,
        };
        let text = self.client.generate_summary(request).await?;
        if text.len() < MIN_SUMMARY_LEN {
            return Err(SummarizationClientError::TooShort { length: text.len() });
        }

        Ok(StudentSummary {
            student_id: student.id,
            name: student.name.clone(),
            summary: text.trim().to_string(),
        })
    }
}

/// HTTP adapter for Ollama's non-streaming generate endpoint.
pub struct OllamaSummarizationClient {
    http: Client,
    base_url: String,
}

impl OllamaSummarizationClient {
    /// Build a client targeting `base_url` (for example `http://localhost:11434`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, SummarizationClientError> {
        let http = Client::builder()
            .user_agent("rusty-roster/summary")
            .build()
            .map_err(|error| SummarizationClientError::ClientBuild(error.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl SummarizationClient for OllamaSummarizationClient {
    async fn generate_summary(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationClientError> {
        let payload = json!({
            "model": request.model,
            "prompt": request.prompt,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "stream": false,
        });
        tracing::debug!(endpoint = %self.endpoint(), %payload, "Sending summary request");

        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummarizationClientError::ProviderUnavailable(format!(
                    "failed to reach Ollama at {}: {error}",
                    self.base_url
                ))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to read Ollama response: {error}"
            ))
        })?;
        tracing::debug!(%status, body = %body, "Raw summary response");

        if !status.is_success() {
            return Err(SummarizationClientError::GenerationFailed(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let parsed: OllamaResponse = serde_json::from_str(&body).map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode Ollama response: {error}"
            ))
        })?;
        Ok(parsed.response)
    }
}
