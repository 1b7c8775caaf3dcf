//! Hugging Face Inference API provider
//!
//! Runs hosted text2text-generation models such as T5 question generators.

use crate::retry::{http_client, send_with_retry};
use crate::{block_on, LlmError};
use pdfquiz_domain::traits::QuestionGenerator;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default inference API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co";

/// T5 model fine-tuned on SQuAD for question generation
pub const DEFAULT_MODEL: &str = "ramsrigouthamg/t5_squad_v1";

/// Default timeout for inference requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retry attempts (models may be cold-starting)
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Hugging Face inference API provider
pub struct HuggingFaceProvider {
    endpoint: String,
    model: String,
    api_token: Option<String>,
    client: reqwest::Client,
    max_retries: u32,
    retry_delay: Duration,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceParameters {
    max_length: usize,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

impl HuggingFaceProvider {
    /// Create a provider for `model` on the inference API at `endpoint`
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(endpoint, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a provider with a custom request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_token: None,
            client: http_client(timeout)?,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_secs(2),
        })
    }

    /// Authenticate requests with a bearer token
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base delay between retries
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    fn url(&self) -> String {
        format!("{}/models/{}", self.endpoint, self.model)
    }

    /// Run text2text generation for `prompt`
    pub async fn generate_async(&self, prompt: &str, max_length: usize) -> Result<String, LlmError> {
        let url = self.url();
        let body = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters { max_length },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        debug!("Hugging Face request to {}", url);

        let response = send_with_retry(&self.model, self.max_retries, self.retry_delay, || {
            let mut request = self.client.post(&url).json(&body);
            if let Some(token) = &self.api_token {
                request = request.bearer_auth(token);
            }
            request.send()
        })
        .await?;

        let outputs: Vec<GeneratedText> = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.generated_text)
            .ok_or_else(|| LlmError::InvalidResponse("Empty generation list".to_string()))
    }
}

impl QuestionGenerator for HuggingFaceProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str, max_length: usize) -> Result<String, Self::Error> {
        block_on(self.generate_async(prompt, max_length))?
    }

    fn model_name(&self) -> String {
        format!("huggingface:{}", self.model)
    }
}
