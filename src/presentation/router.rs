use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{FileLoader, TextSplitter};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{health_handler, providers_handler, summarize_pdf_handler};
use crate::presentation::state::AppState;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn create_router<F, T>(state: AppState<F, T>, max_upload_bytes: usize) -> Router
where
    F: FileLoader + 'static,
    T: TextSplitter + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler::<F, T>))
        .route("/api/v1/providers", get(providers_handler::<F, T>))
        .route(
            "/summarize-pdf",
            post(summarize_pdf_handler::<F, T>).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
