//! Provider selection and construction from configuration

use crate::{huggingface, ollama, DynQuestionGenerator, HuggingFaceProvider, LlmError, MockProvider, OllamaProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Which model backend generates questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Local Ollama server
    #[default]
    Ollama,
    /// Hugging Face inference API
    #[serde(rename = "huggingface")]
    HuggingFace,
    /// Canned responses, no model
    Mock,
}

/// Model provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Backend to use
    #[serde(default)]
    pub provider: ProviderKind,

    /// API base URL (provider default when unset)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Model name (provider default when unset)
    #[serde(default)]
    pub model: Option<String>,

    /// Bearer token for hosted APIs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per generation call
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

/// Upper bound on `max_retries`; backoff doubles per attempt
pub const MAX_RETRIES_LIMIT: u32 = 10;

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            endpoint: None,
            model: None,
            api_token: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl ModelConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be greater than 0".to_string());
        }
        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(format!(
                "max_retries must be at most {}",
                MAX_RETRIES_LIMIT
            ));
        }
        Ok(())
    }
}

/// Construct the configured question generator
///
/// The result is created once at start-up and shared between requests.
pub fn build_provider(config: &ModelConfig) -> Result<Arc<DynQuestionGenerator>, LlmError> {
    config.validate().map_err(LlmError::Config)?;
    let timeout = Duration::from_secs(config.timeout_secs);

    let provider: Arc<DynQuestionGenerator> = match config.provider {
        ProviderKind::Ollama => {
            let endpoint = config.endpoint.as_deref().unwrap_or(ollama::DEFAULT_ENDPOINT);
            let model = config.model.as_deref().unwrap_or(ollama::DEFAULT_MODEL);
            Arc::new(
                OllamaProvider::with_timeout(endpoint, model, timeout)?
                    .with_max_retries(config.max_retries),
            )
        }
        ProviderKind::HuggingFace => {
            let endpoint = config
                .endpoint
                .as_deref()
                .unwrap_or(huggingface::DEFAULT_ENDPOINT);
            let model = config.model.as_deref().unwrap_or(huggingface::DEFAULT_MODEL);
            let mut provider = HuggingFaceProvider::with_timeout(endpoint, model, timeout)?
                .with_max_retries(config.max_retries);
            if let Some(token) = &config.api_token {
                provider = provider.with_api_token(token.clone());
            }
            Arc::new(provider)
        }
        ProviderKind::Mock => Arc::new(MockProvider::default()),
    };

    info!("Question generator: {}", provider.model_name());
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ollama() {
        let config = ModelConfig::default();
        assert_eq!(config.provider, ProviderKind::Ollama);
        assert!(config.validate().is_ok());

        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.model_name(), "ollama:llama3.2");
    }

    #[test]
    fn test_parse_huggingface_toml() {
        let config: ModelConfig = toml::from_str(
            r#"
            provider = "huggingface"
            api_token = "hf_secret"
            timeout_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.provider, ProviderKind::HuggingFace);
        assert_eq!(config.api_token.as_deref(), Some("hf_secret"));
        assert_eq!(config.max_retries, 3);

        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.model_name(), "huggingface:ramsrigouthamg/t5_squad_v1");
    }

    #[test]
    fn test_mock_provider_from_config() {
        let config: ModelConfig = toml::from_str(r#"provider = "mock""#).unwrap();
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.model_name(), "mock");
    }

    #[test]
    fn test_invalid_timeout() {
        let config = ModelConfig {
            timeout_secs: 0,
            ..ModelConfig::default()
        };
        assert!(matches!(build_provider(&config), Err(LlmError::Config(_))));
    }

    #[test]
    fn test_max_retries_bounded() {
        let config = ModelConfig {
            max_retries: MAX_RETRIES_LIMIT,
            ..ModelConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = ModelConfig {
            max_retries: 40,
            ..ModelConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(matches!(build_provider(&config), Err(LlmError::Config(_))));
    }
}
