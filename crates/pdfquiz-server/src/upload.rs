//! Multipart form parsing and temporary upload staging

use crate::handlers::{AppError, NO_FILE_PART};
use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use pdfquiz_domain::traits::TextExtractor;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Multipart field holding the document
pub const FILE_FIELD: &str = "file";

/// Multipart field holding the requested question count
pub const NUM_QUESTIONS_FIELD: &str = "num_questions";

/// A file received in the upload form
#[derive(Debug)]
pub struct UploadedFile {
    /// Client-supplied file name (may be empty)
    pub file_name: String,
    /// File contents
    pub bytes: Bytes,
}

/// The fields of the upload form this server understands
#[derive(Debug, Default)]
pub struct UploadForm {
    /// First `file` field, if any
    pub file: Option<UploadedFile>,
    /// Raw `num_questions` value, if any
    pub num_questions: Option<String>,
}

/// Read the whole multipart body, keeping the fields we know
pub async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            // A `file` part without a filename is a plain text value, not an upload
            Some(FILE_FIELD) if form.file.is_none() && field.file_name().is_some() => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.file = Some(UploadedFile { file_name, bytes });
            }
            Some(NUM_QUESTIONS_FIELD) => {
                form.num_questions = Some(field.text().await.map_err(multipart_error)?);
            }
            other => debug!("Ignoring form field {:?}", other),
        }
    }

    Ok(form)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        debug!("Malformed multipart body: {}", e);
        AppError::bad_request(NO_FILE_PART)
    }
}

/// True for names ending in `.pdf`, ignoring case
pub fn is_pdf_filename(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Write the upload to a temporary file, extract its text and delete it.
///
/// The temporary file is owned by the blocking task, so it is removed on
/// every path out of it, unwinding included.
pub async fn stage_and_extract(
    extractor: Arc<dyn TextExtractor + Send + Sync>,
    upload_dir: PathBuf,
    bytes: Bytes,
) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let mut staged = tempfile::Builder::new()
            .prefix("pdfquiz-")
            .suffix(".pdf")
            .tempfile_in(&upload_dir)
            .map_err(|e| AppError::InternalError(format!("Failed to create temp file: {}", e)))?;

        staged
            .write_all(&bytes)
            .and_then(|_| staged.flush())
            .map_err(|e| AppError::InternalError(format!("Failed to save upload: {}", e)))?;

        debug!("Staged upload at {:?}", staged.path());
        let text = extractor.extract_text(staged.path());

        if let Err(e) = staged.close() {
            warn!("Failed to remove temporary upload: {}", e);
        }

        Ok(text)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Extraction task failed: {}", e)))?
}
