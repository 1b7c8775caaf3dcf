//! HTTP request handlers for the quiz server.
//!
//! Implements the upload, landing page and health check endpoints using axum.

use crate::upload::{is_pdf_filename, read_upload_form, stage_and_extract};
use pdfquiz_domain::traits::TextExtractor;
use pdfquiz_domain::QaPair;
use pdfquiz_generator::QaAssembler;
use pdfquiz_llm::DynQuestionGenerator;
use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

/// Returned when the request carries no `file` field
pub const NO_FILE_PART: &str = "No file part";
/// Returned when the uploaded file has an empty name
pub const NO_SELECTED_FILE: &str = "No selected file";
/// Returned for non-PDF uploads
pub const INVALID_FILE_TYPE: &str = "Invalid file type. Please upload a PDF file.";
/// Returned when the PDF has no extractable text
pub const NO_TEXT: &str =
    "Could not extract any text from the PDF. The file might be scanned or protected.";
/// Returned when no question survived generation
pub const NO_QUESTIONS: &str = "Could not generate questions from the provided PDF content.";

static INDEX_HTML: &str = include_str!("../static/index.html");

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Sentence sampling and question generation
    pub assembler: Arc<QaAssembler<DynQuestionGenerator>>,
    /// PDF text extraction
    pub extractor: Arc<dyn TextExtractor + Send + Sync>,
    /// Directory for request-scoped temporary uploads
    pub upload_dir: PathBuf,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
}

/// A generated question with its answer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QaPairResponse {
    /// Generated question
    pub question: String,
    /// Source sentence
    pub answer: String,
}

impl From<QaPair> for QaPairResponse {
    fn from(pair: QaPair) -> Self {
        let (question, answer) = pair.into_parts();
        Self { question, answer }
    }
}

/// Successful upload response
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Generated pairs, in sampling order
    pub qa_pairs: Vec<QaPairResponse>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Question generation model in use
    pub model: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Invalid input or unusable content
    BadRequest(String),
    /// Request body over the configured limit
    PayloadTooLarge(String),
    /// Unexpected failure while processing
    InternalError(String),
}

impl AppError {
    pub(crate) fn bad_request(message: &str) -> Self {
        AppError::BadRequest(message.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            AppError::InternalError(msg) => {
                error!("Request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("An error occurred: {}", msg),
                )
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

/// POST /upload - Generate QA pairs from an uploaded PDF
///
/// The upload lives in a temporary file only while its text is extracted.
async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Rejected non-multipart upload: {}", e);
        AppError::bad_request(NO_FILE_PART)
    })?;

    let form = read_upload_form(&mut multipart).await?;

    let file = form.file.ok_or_else(|| AppError::bad_request(NO_FILE_PART))?;
    if file.file_name.is_empty() {
        return Err(AppError::bad_request(NO_SELECTED_FILE));
    }
    if !is_pdf_filename(&file.file_name) {
        return Err(AppError::bad_request(INVALID_FILE_TYPE));
    }

    let num_questions = state
        .assembler
        .config()
        .question_count(form.num_questions.as_deref());

    info!(
        "Processing '{}' ({} bytes), {} questions requested",
        file.file_name,
        file.bytes.len(),
        num_questions
    );

    let text = stage_and_extract(
        Arc::clone(&state.extractor),
        state.upload_dir.clone(),
        file.bytes,
    )
    .await?;

    if text.trim().is_empty() {
        return Err(AppError::bad_request(NO_TEXT));
    }

    let mut rng = StdRng::from_entropy();
    let outcome = state
        .assembler
        .generate_from_text(&text, num_questions, &mut rng)
        .await;

    if outcome.is_empty() {
        return Err(AppError::bad_request(NO_QUESTIONS));
    }

    Ok(Json(UploadResponse {
        qa_pairs: outcome.pairs.into_iter().map(QaPairResponse::from).collect(),
    }))
}

/// GET / - Landing page with the upload form
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health - Liveness and model identity
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        model: state.assembler.model_name(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
