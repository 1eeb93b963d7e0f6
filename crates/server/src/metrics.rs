//! Prometheus metrics

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::state::AppState;
use crate::ServerError;

/// Install the global Prometheus recorder.
///
/// Can only succeed once per process.
pub fn init_metrics() -> Result<PrometheusHandle, ServerError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Configuration(format!("Failed to install metrics recorder: {}", e)))?;

    metrics::describe_counter!("chat_requests_total", "Chat messages by detected intent");
    metrics::describe_counter!("page_fetch_failures_total", "Failed source page fetches by category");
    metrics::describe_counter!("pdf_rendered_total", "PDF documents rendered by category");
    metrics::describe_counter!("sink_failures_total", "Failed secondary sink writes by sink");

    Ok(handle)
}

/// GET /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => ServerError::NotFound("Metrics disabled".to_string()).into_response(),
    }
}
