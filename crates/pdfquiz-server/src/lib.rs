//! PDF Quiz Server
//!
//! HTTP front end: accepts PDF uploads and answers with generated
//! question/answer pairs.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod upload;

use config::ServerConfig;
use handlers::{create_router, AppState};
use pdfquiz_generator::{GeneratorError, QaAssembler};
use pdfquiz_llm::{build_provider, DynQuestionGenerator, LlmError};
use pdfquiz_pdf::PdfTextExtractor;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Model provider could not be created
    #[error("Model provider error: {0}")]
    Provider(#[from] LlmError),

    /// Question generator could not be created
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

impl AppState {
    /// Build the application state around an already constructed generator
    pub fn from_config(
        config: &ServerConfig,
        generator: Arc<DynQuestionGenerator>,
    ) -> Result<Self, ServerError> {
        let assembler = QaAssembler::new(generator, config.generation.clone())?;

        Ok(AppState {
            assembler: Arc::new(assembler),
            extractor: Arc::new(PdfTextExtractor::new()),
            upload_dir: config.upload_dir(),
            max_upload_bytes: config.max_upload_bytes,
        })
    }
}

/// Start the HTTP server
///
/// Creates the question generator once, builds the shared state and serves
/// until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    config.validate()?;

    info!("Starting PDF quiz server");
    info!("Bind address: {}", config.bind_addr());
    info!("Upload directory: {:?}", config.upload_dir());
    info!(
        "Questions per request: default {}, range [{}, {}]",
        config.generation.default_questions,
        config.generation.min_questions,
        config.generation.max_questions
    );

    let generator = build_provider(&config.model)?;
    let state = AppState::from_config(&config, generator)?;

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfquiz_llm::MockProvider;

    #[test]
    fn test_state_from_config() {
        let mut config = ServerConfig::default_config();
        config.max_upload_bytes = 4096;

        let generator: Arc<DynQuestionGenerator> = Arc::new(MockProvider::default());
        let state = AppState::from_config(&config, generator).unwrap();

        assert_eq!(state.max_upload_bytes, 4096);
        assert_eq!(state.assembler.model_name(), "mock");
        assert_eq!(state.upload_dir, std::env::temp_dir());
    }

    #[test]
    fn test_state_rejects_invalid_generation_config() {
        let mut config = ServerConfig::default_config();
        config.generation.max_length = 0;

        let generator: Arc<DynQuestionGenerator> = Arc::new(MockProvider::default());
        assert!(matches!(
            AppState::from_config(&config, generator),
            Err(ServerError::Generator(_))
        ));
    }
}
