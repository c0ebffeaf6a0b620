use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{FileLoader, TextSplitter};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ProvidersResponse {
    pub providers: Vec<ProviderStatusResponse>,
}

#[derive(Serialize)]
pub struct ProviderStatusResponse {
    pub name: String,
    pub priority: usize,
    pub available: bool,
    pub cooldown_until: Option<String>,
}

/// Lists providers in the order they are tried, with their cooldown state.
pub async fn providers_handler<F, T>(State(state): State<AppState<F, T>>) -> impl IntoResponse
where
    F: FileLoader + 'static,
    T: TextSplitter + 'static,
{
    let providers = state
        .summary_service
        .summarizer()
        .provider_statuses()
        .into_iter()
        .enumerate()
        .map(|(i, status)| ProviderStatusResponse {
            name: status.provider.to_string(),
            priority: i + 1,
            available: status.is_available(),
            cooldown_until: status.cooldown_until.map(|t| t.to_rfc3339()),
        })
        .collect();

    Json(ProvidersResponse { providers })
}
