use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{FileLoader, TextSplitter};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub providers_available: usize,
    pub providers_total: usize,
}

pub async fn health_handler<F, T>(State(state): State<AppState<F, T>>) -> impl IntoResponse
where
    F: FileLoader + 'static,
    T: TextSplitter + 'static,
{
    let statuses = state.summary_service.summarizer().provider_statuses();
    let providers_available = statuses.iter().filter(|s| s.is_available()).count();

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            providers_available,
            providers_total: statuses.len(),
        }),
    )
}
