use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::{FileLoader, TextSplitter};
use crate::application::services::SummaryJobError;
use crate::domain::Document;
use crate::presentation::state::AppState;

use super::error_response::error_response;

pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

struct Upload {
    filename: String,
    data: Vec<u8>,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn summarize_pdf_handler<F, T>(
    State(state): State<AppState<F, T>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response
where
    F: FileLoader + 'static,
    T: TextSplitter + 'static,
{
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!(error = %e, "Summarize request is not a multipart upload");
            return error_response(StatusCode::BAD_REQUEST, "No file uploaded.");
        }
    };

    let upload = match read_file_field(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            tracing::warn!("Summarize request with no file");
            return error_response(StatusCode::BAD_REQUEST, "No file uploaded.");
        }
        Err(response) => return response,
    };

    tracing::debug!(
        filename = %upload.filename,
        bytes = upload.data.len(),
        "File data received"
    );

    let document = Document::new(upload.filename, upload.data.len() as u64);

    match state.summary_service.summarize(&upload.data, &document).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(SummaryResponse {
                summary: summary.text(),
            }),
        )
            .into_response(),
        Err(e @ SummaryJobError::PageLimitExceeded { .. }) => {
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(SummaryJobError::FileLoading(e)) => {
            tracing::warn!(error = %e, "Uploaded file is not a readable PDF");
            error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Failed to read PDF: {}", e),
            )
        }
    }
}

/// Scans the multipart body for the `file` field, ignoring any others.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<Upload>, Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err(error_response(
                    e.status(),
                    format!("Failed to read multipart: {}", e),
                ));
            }
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.pdf").to_string();
        let data = field.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read file bytes");
            error_response(e.status(), format!("Failed to read file: {}", e))
        })?;

        return Ok(Some(Upload {
            filename,
            data: data.to_vec(),
        }));
    }
}
