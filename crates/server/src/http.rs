//! HTTP Endpoints
//!
//! JSON API behind the chat window and the lead forms. Field names are camelCase
//! to match the front-end.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Json, Path, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use compliance_agent_agent::ChatReply;
use compliance_agent_core::labour_codes::comparison_tables;
use compliance_agent_core::{DocumentCategory, LabourCode, StateKey};
use compliance_agent_pdf::{filename, ReportRequest};
use compliance_agent_persistence::Worksheet;

use crate::intake::{
    self, DownloadForm, FeeEnquiryForm, GeneralEnquiryForm, ServiceEnquiryForm,
};
use crate::metrics::metrics_handler;
use crate::state::AppState;
use crate::ServerError;

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);
const LABOUR_CODE_REGION: &str = "India";
const COMPARISON_ACT: &str = "Complete Labour Code Comparison";
const COMPARISON_STATS_KEY: &str = "labour_code_comparison";
const COMPARISON_DATE: &str = "November 2025";
const COMPARISON_FILENAME: &str = "labour_codes_comparison.pdf";
const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let server = &state.settings.server;
    let cors_layer = build_cors_layer(&server.cors_origins, server.cors_enabled);
    let timeout = Duration::from_secs(server.request_timeout_secs);

    Router::new()
        .route("/chat", post(chat))
        // Lead-gated documents
        .route("/request-download", post(request_download))
        .route("/generate-pdf/:token", get(generate_pdf))
        .route("/download/:state/:act_type", get(direct_download))
        .route("/download-labour-code/:code_key", get(download_labour_code))
        .route("/download-labour-code-comparison", get(download_labour_code_comparison))
        // Enquiries
        .route("/submit-service-enquiry", post(submit_service_enquiry))
        .route("/submit-fee-enquiry", post(submit_fee_enquiry))
        .route("/submit-enquiry", post(submit_enquiry))
        .route("/states/:act_type", get(list_states))
        // Health
        .route("/check-ollama", get(check_ollama))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/db-status", get(db_status))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .with_state(state)
}

/// CORS layer from configured origins
///
/// - disabled: permissive
/// - no valid origins: localhost:3000 only
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No usable CORS origins configured, defaulting to {}", DEFAULT_ORIGIN);
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static(DEFAULT_ORIGIN))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// First `X-Forwarded-For` hop, else the socket peer
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn pdf_response(bytes: Vec<u8>, name: &str, category: &'static str) -> Response {
    metrics::counter!("pdf_rendered_total", "category" => category).increment(1);
    tracing::info!(filename = name, size = bytes.len(), "Serving PDF");
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", name),
            ),
        ],
        bytes,
    )
        .into_response()
}

fn parse_act(act_type: &str) -> Result<DocumentCategory, ServerError> {
    DocumentCategory::parse(act_type)
        .ok_or_else(|| ServerError::BadRequest(format!("Invalid act type: {}", act_type)))
}

/// Chat request
#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
}

/// POST /chat
async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Json<ChatReply> {
    Json(state.dispatcher.reply(&request.message).await)
}

/// POST /request-download
///
/// The token is issued even when the database write fails so a retry of the
/// form is not needed once the store recovers.
async fn request_download(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(form): Json<DownloadForm>,
) -> Result<Json<serde_json::Value>, ServerError> {
    form.validate()?;

    let ip = client_ip(&headers, peer.map(|ConnectInfo(addr)| addr));
    let record = form.to_record(ip.clone(), user_agent(&headers), intake::now());
    let stored = state.persistence.leads.record_download(&record).await;
    let download_id = stored.as_ref().ok().copied();

    intake::spawn_sheet_row(
        &state.persistence,
        Worksheet::Downloads,
        intake::download_row(&record, download_id),
    );
    let token = state.downloads.issue(form.clone(), download_id, ip);

    let id = stored?;
    tracing::info!(
        download_id = id,
        state = %form.state,
        act_type = %form.act_type,
        "Download request recorded"
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "downloadId": id,
        "downloadToken": token,
        "downloadUrl": form.download_url(&token, id),
        "message": "Download request recorded successfully",
    })))
}

/// GET /generate-pdf/:token
async fn generate_pdf(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ServerError> {
    let pending = state.downloads.redeem(&token)?;
    let key = StateKey::from_slug(&pending.form.state);
    let category = parse_act(&pending.form.act_type)?;

    let result = state
        .documents
        .fetch(category, &key)
        .await
        .filter(|r| !r.tables.is_empty())
        .ok_or_else(|| ServerError::NotFound("No data found to generate PDF".to_string()))?;

    let bytes = state
        .renderer
        .render(&key, category, &result.tables, result.effective_date.as_deref())?;
    Ok(pdf_response(bytes, &filename(category, &key), category.as_str()))
}

/// GET /download/:state/:act_type
async fn direct_download(
    State(state): State<AppState>,
    Path((state_slug, act_type)): Path<(String, String)>,
) -> Result<Response, ServerError> {
    let key = StateKey::from_slug(&state_slug);
    let category = parse_act(&act_type)?;

    let result = state
        .documents
        .fetch(category, &key)
        .await
        .ok_or_else(|| ServerError::NotFound("State not found".to_string()))?;
    if result.tables.is_empty() {
        return Err(ServerError::NotFound("No data available".to_string()));
    }

    let bytes = state
        .renderer
        .render(&key, category, &result.tables, result.effective_date.as_deref())?;
    let name = format!("{}_{}.pdf", category.act_label(), key.slug());
    Ok(pdf_response(bytes, &name, category.as_str()))
}

/// Count a labour code download without failing the request
async fn bump_labour_code_stats(state: &AppState, act_type: &str) {
    if let Err(e) = state
        .persistence
        .leads
        .bump_download_stats(LABOUR_CODE_REGION, act_type, intake::now())
        .await
    {
        tracing::warn!(act_type, error = %e, "Failed to update labour code download stats");
    }
}

/// GET /download-labour-code/:code_key
async fn download_labour_code(
    State(state): State<AppState>,
    Path(code_key): Path<String>,
) -> Result<Response, ServerError> {
    let code = LabourCode::find(&code_key)
        .map_err(|_| ServerError::NotFound("Invalid labour code".to_string()))?;
    bump_labour_code_stats(&state, &code.stats_act_type()).await;

    if let Some(url) = code.redirect_url() {
        tracing::debug!(code = code.key, url, "Redirecting to hosted labour code");
        return Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response());
    }

    let tables = code.detail_tables();
    let bytes = state.renderer.render_report(&ReportRequest {
        state: LABOUR_CODE_REGION,
        act: code.title,
        tables: &tables,
        effective_date: Some(code.effective_date),
    })?;
    Ok(pdf_response(bytes, &code.pdf_filename(), "labour_code"))
}

/// GET /download-labour-code-comparison
async fn download_labour_code_comparison(
    State(state): State<AppState>,
) -> Result<Response, ServerError> {
    bump_labour_code_stats(&state, COMPARISON_STATS_KEY).await;

    let tables = comparison_tables();
    let bytes = state.renderer.render_report(&ReportRequest {
        state: LABOUR_CODE_REGION,
        act: COMPARISON_ACT,
        tables: &tables,
        effective_date: Some(COMPARISON_DATE),
    })?;
    Ok(pdf_response(bytes, COMPARISON_FILENAME, "labour_code"))
}

/// POST /submit-service-enquiry
async fn submit_service_enquiry(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(form): Json<ServiceEnquiryForm>,
) -> Result<Json<serde_json::Value>, ServerError> {
    form.validate()?;

    let ip = client_ip(&headers, peer.map(|ConnectInfo(addr)| addr));
    let enquiry = form.into_enquiry(ip, intake::now());
    let stored = state.persistence.leads.record_service_enquiry(&enquiry).await;
    let enquiry_id = enquiry.enquiry_id.clone();
    intake::spawn_service_sinks(&state.persistence, enquiry);
    stored?;

    tracing::info!(enquiry_id = %enquiry_id, "Service enquiry recorded");
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Service enquiry submitted successfully",
        "enquiryId": enquiry_id,
    })))
}

/// POST /submit-fee-enquiry
async fn submit_fee_enquiry(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(form): Json<FeeEnquiryForm>,
) -> Result<Json<serde_json::Value>, ServerError> {
    form.validate()?;

    let ip = client_ip(&headers, peer.map(|ConnectInfo(addr)| addr));
    let enquiry = form.into_enquiry(ip, intake::now());
    let stored = state.persistence.leads.record_fee_enquiry(&enquiry).await;
    let enquiry_id = enquiry.enquiry_id.clone();
    intake::spawn_fee_sinks(&state.persistence, enquiry);
    stored?;

    tracing::info!(enquiry_id = %enquiry_id, "Fee enquiry recorded");
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Fee enquiry submitted successfully",
        "enquiryId": enquiry_id,
    })))
}

/// POST /submit-enquiry
///
/// General enquiries only go to the spreadsheet.
async fn submit_enquiry(
    State(state): State<AppState>,
    Json(form): Json<GeneralEnquiryForm>,
) -> Result<Json<serde_json::Value>, ServerError> {
    form.validate()?;
    let row = intake::general_row(&form, intake::now());
    intake::spawn_sheet_row(&state.persistence, Worksheet::Enquiries, row);

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Enquiry submitted successfully",
    })))
}

/// GET /states/:act_type
async fn list_states(
    State(state): State<AppState>,
    Path(act_type): Path<String>,
) -> Json<serde_json::Value> {
    let states: Vec<String> = DocumentCategory::parse(&act_type)
        .map(|category| {
            state
                .documents
                .vocabulary()
                .keys(category)
                .into_iter()
                .map(|k| k.as_str().to_string())
                .collect()
        })
        .unwrap_or_default();

    Json(serde_json::json!({
        "states": states,
        "act_type": act_type,
    }))
}

/// GET /check-ollama
async fn check_ollama(State(state): State<AppState>) -> Json<serde_json::Value> {
    let connected = match &state.llm {
        Some(backend) => backend.is_available().await,
        None => false,
    };

    Json(serde_json::json!({
        "status": if connected { "connected" } else { "disconnected" },
        "model": state.model_name(),
    }))
}

/// GET /health
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "compliance-agent",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /ready
///
/// Ready once the lead store answers. The inference probe is reported but
/// never blocks readiness.
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let mut checks = serde_json::Map::new();

    let database_status =
        match tokio::time::timeout(PROBE_TIMEOUT, state.persistence.leads.ping()).await {
            Ok(Ok(())) => "ok",
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Database readiness probe failed");
                "error"
            }
            Err(_) => "timeout",
        };
    let ready = database_status == "ok";
    checks.insert(
        "database".to_string(),
        serde_json::json!({ "status": database_status }),
    );

    let llm_status = match &state.llm {
        Some(backend) => match tokio::time::timeout(PROBE_TIMEOUT, backend.is_available()).await {
            Ok(true) => "ok",
            Ok(false) => "unreachable",
            Err(_) => "timeout",
        },
        None => "disabled",
    };
    checks.insert(
        "llm_backend".to_string(),
        serde_json::json!({ "status": llm_status, "model": state.model_name() }),
    );

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": if ready { "ready" } else { "not_ready" },
            "checks": checks,
        })),
    )
}

/// GET /db-status
async fn db_status(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ServerError> {
    let counts = state.persistence.leads.table_counts().await?;
    Ok(Json(serde_json::json!({
        "status": "connected",
        "database": state.settings.database.name,
        "tables": counts,
    })))
}
