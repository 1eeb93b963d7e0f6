//! Integration tests for the HTTP surface
//!
//! The router runs against in-memory pages and persistence fakes.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use compliance_agent_config::Settings;
use compliance_agent_llm::FixedBackend;
use compliance_agent_persistence::{
    InMemoryLeadStore, InMemoryNotifier, InMemorySheetSink, PersistenceLayer, Worksheet,
};
use compliance_agent_scraper::InMemoryPages;
use compliance_agent_server::{create_router, AppState};

const TAMIL_NADU_WAGES: &str = r#"<html><body>
    <p>Effective from Date: 1st October 2025</p>
    <table>
        <tr><th>Class of Employment</th><th>Per Day</th></tr>
        <tr><td>Unskilled</td><td>Rs 650</td></tr>
    </table>
</body></html>"#;

struct Harness {
    router: Router,
    state: AppState,
    leads: Arc<InMemoryLeadStore>,
    notifier: Arc<InMemoryNotifier>,
    sheets: Arc<InMemorySheetSink>,
}

fn harness_with(leads: InMemoryLeadStore, llm: Option<Arc<FixedBackend>>) -> Harness {
    let pages = InMemoryPages::new()
        .with_page("https://www.slci.in/minimum-wages/tamil-nadu/", TAMIL_NADU_WAGES);
    let leads = Arc::new(leads);
    let notifier = Arc::new(InMemoryNotifier::new());
    let sheets = Arc::new(InMemorySheetSink::new());
    let persistence = PersistenceLayer {
        leads: leads.clone(),
        notifier: notifier.clone(),
        sheets: sheets.clone(),
    };

    let llm = llm.map(|b| b as Arc<dyn compliance_agent_llm::LlmBackend>);
    let state = AppState::new(Settings::default(), Arc::new(pages), persistence, llm).unwrap();
    Harness {
        router: create_router(state.clone()),
        state,
        leads,
        notifier,
        sheets,
    }
}

fn harness() -> Harness {
    harness_with(InMemoryLeadStore::new(), None)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>, axum::http::HeaderMap) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec(), headers)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Vec<u8>, axum::http::HeaderMap) {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes, _) = send(router, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

/// Secondary sinks run on spawned tasks
async fn eventually(check: impl Fn() -> bool) {
    for _ in 0..100 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached");
}

fn download_form(act_type: &str) -> Value {
    json!({
        "fullName": "Asha Rao",
        "companyName": "Rao Textiles",
        "email": "asha@example.com",
        "contactNumber": "9876543210",
        "rating": "4",
        "state": "tamil_nadu",
        "actType": act_type,
    })
}

#[tokio::test]
async fn test_health() {
    let h = harness();
    let (status, body, _) = get(&h.router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["status"], "healthy");
}

#[tokio::test]
async fn test_chat_reply() {
    let h = harness();
    let (status, body) = post_json(
        &h.router,
        "/chat",
        json!({ "message": "minimum wages in tamil nadu" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "tamil nadu");
    assert_eq!(body["act_type"], "minimum_wages");
    assert!(body["response"].as_str().unwrap().contains("Rs 650"));
}

#[tokio::test]
async fn test_request_download_then_generate_pdf() {
    let h = harness();
    let (status, body) = post_json(&h.router, "/request-download", download_form("minimum_wages")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["downloadId"], 1);

    let token = body["downloadToken"].as_str().unwrap().to_string();
    assert_eq!(body["downloadUrl"], format!("/generate-pdf/{}", token));

    let stored = h.leads.downloads();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].designation, "Not Provided");
    assert_eq!(stored[0].rating, 4);
    assert_eq!(h.leads.download_count("tamil_nadu", "minimum_wages"), 1);

    let (status, pdf, headers) = get(&h.router, &format!("/generate-pdf/{}", token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert!(headers[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("minimum_wages_tamil_nadu.pdf"));
    assert!(pdf.starts_with(b"%PDF"));

    // single use
    let (status, body, _) = get(&h.router, &format!("/generate-pdf/{}", token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["error"], "Invalid or expired download token");

    let sheets = h.sheets.clone();
    eventually(move || sheets.rows(Worksheet::Downloads).len() == 1).await;
}

#[tokio::test]
async fn test_request_download_missing_field() {
    let h = harness();
    let mut form = download_form("minimum_wages");
    form["email"] = json!("");
    let (status, body) = post_json(&h.router, "/request-download", form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "success": false, "error": "Missing field: email" }));
    assert!(h.state.downloads.is_empty());
}

#[tokio::test]
async fn test_request_download_database_down() {
    let h = harness_with(InMemoryLeadStore::unavailable(), None);
    let (status, body) = post_json(&h.router, "/request-download", download_form("holiday_list")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database error - please try again");
    // token kept for a later retry
    assert_eq!(h.state.downloads.len(), 1);
}

#[tokio::test]
async fn test_pdf_without_tables() {
    let h = harness();
    let mut form = download_form("holiday_list");
    form["state"] = json!("goa");
    let (_, body) = post_json(&h.router, "/request-download", form).await;
    let url = body["downloadUrl"].as_str().unwrap().to_string();

    let (status, body, _) = get(&h.router, &url).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["error"], "No data found to generate PDF");
}

#[tokio::test]
async fn test_labour_code_download_url() {
    let h = harness();
    let (_, body) = post_json(
        &h.router,
        "/request-download",
        download_form("labour_code_code_on_wages"),
    )
    .await;
    assert_eq!(body["downloadUrl"], "/download-labour-code/code_on_wages?id=1");
}

#[tokio::test]
async fn test_direct_download() {
    let h = harness();
    let (status, pdf, headers) = get(&h.router, "/download/tamil_nadu/minimum_wages").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("Minimum_Wages_tamil_nadu.pdf"));
    assert!(pdf.starts_with(b"%PDF"));

    let (status, body, _) = get(&h.router, "/download/goa/holiday_list").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["error"], "No data available");

    let (status, body, _) = get(&h.router, "/download/atlantis/holiday_list").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["error"], "State not found");

    let (status, _, _) = get(&h.router, "/download/goa/pension_rules").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_labour_code_downloads() {
    let h = harness();

    let (status, _, headers) = get(&h.router, "/download-labour-code/code_on_wages").await;
    assert_eq!(status, StatusCode::FOUND);
    assert!(headers[header::LOCATION]
        .to_str()
        .unwrap()
        .starts_with("https://drive.google.com/uc?export=download"));
    assert_eq!(h.leads.download_count("India", "labour_code_code_on_wages"), 1);

    let (status, pdf, headers) = get(&h.router, "/download-labour-code/occupational_safety").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("occupational_safety_notification.pdf"));
    assert!(pdf.starts_with(b"%PDF"));

    let (status, body, _) = get(&h.router, "/download-labour-code/pension_code").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["error"], "Invalid labour code");

    let (status, pdf, headers) = get(&h.router, "/download-labour-code-comparison").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("labour_codes_comparison.pdf"));
    assert!(pdf.starts_with(b"%PDF"));
    assert_eq!(h.leads.download_count("India", "labour_code_comparison"), 1);
}

#[tokio::test]
async fn test_service_enquiry() {
    let h = harness();
    let mut form = json!({
        "fullName": "Asha Rao",
        "companyName": "Rao Textiles",
        "email": "asha@",
        "contactNumber": "9876543210",
        "service": "Payroll Outsourcing",
        "query": "Monthly payroll for 40 staff",
    });

    let (status, body) = post_json(&h.router, "/submit-service-enquiry", form.clone()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email format");

    form["email"] = json!("asha@example.com");
    let (status, body) = post_json(&h.router, "/submit-service-enquiry", form).await;
    assert_eq!(status, StatusCode::OK);
    let id = body["enquiryId"].as_str().unwrap().to_string();
    assert!(id.starts_with("SER-"));
    assert_eq!(h.leads.service_enquiries().len(), 1);

    let notifier = h.notifier.clone();
    let expected = format!("New Service Enquiry - Payroll Outsourcing - ID: {}", id);
    eventually(move || notifier.subjects() == vec![expected.clone()]).await;
    let sheets = h.sheets.clone();
    eventually(move || sheets.rows(Worksheet::ServiceEnquiries).len() == 1).await;
}

#[tokio::test]
async fn test_fee_enquiry() {
    let h = harness();
    let form = json!({
        "fullName": "Asha Rao",
        "companyName": "Rao Textiles",
        "email": "asha@example.com",
        "contactNumber": "12345",
        "description": "Quote for registrations",
    });
    let (status, body) = post_json(&h.router, "/submit-fee-enquiry", form.clone()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid phone number");

    let mut form = form;
    form["contactNumber"] = json!("98765-43210");
    let (status, body) = post_json(&h.router, "/submit-fee-enquiry", form).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["enquiryId"].as_str().unwrap().starts_with("FEE-"));

    let sheets = h.sheets.clone();
    eventually(move || sheets.rows(Worksheet::FeeEnquiries).len() == 1).await;
}

#[tokio::test]
async fn test_general_enquiry_goes_to_sheet() {
    let h = harness();
    let (status, body) = post_json(
        &h.router,
        "/submit-enquiry",
        json!({
            "fullName": "Asha Rao",
            "email": "asha@example.com",
            "contactNumber": "9876543210",
            "query": "Do you handle POSH training?",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let sheets = h.sheets.clone();
    eventually(move || sheets.rows(Worksheet::Enquiries).len() == 1).await;
    assert!(h.leads.service_enquiries().is_empty());
}

#[tokio::test]
async fn test_states_listing() {
    let h = harness();
    let (_, body, _) = get(&h.router, "/states/holiday_list").await;
    let body = json_body(&body);
    assert_eq!(body["act_type"], "holiday_list");
    let states = body["states"].as_array().unwrap();
    assert!(states.contains(&json!("goa")));

    let (_, body, _) = get(&h.router, "/states/pension_rules").await;
    assert_eq!(json_body(&body)["states"], json!([]));
}

#[tokio::test]
async fn test_check_ollama() {
    let h = harness();
    let (_, body, _) = get(&h.router, "/check-ollama").await;
    assert_eq!(json_body(&body)["status"], "disconnected");

    let h = harness_with(
        InMemoryLeadStore::new(),
        Some(Arc::new(FixedBackend::answering("ok"))),
    );
    let (_, body, _) = get(&h.router, "/check-ollama").await;
    assert_eq!(json_body(&body)["status"], "connected");
}

#[tokio::test]
async fn test_readiness_follows_database() {
    let h = harness();
    let (status, body, _) = get(&h.router, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["checks"]["llm_backend"]["status"], "disabled");

    let h = harness_with(InMemoryLeadStore::unavailable(), None);
    let (status, body, _) = get(&h.router, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(&body)["checks"]["database"]["status"], "error");
}

#[tokio::test]
async fn test_db_status_counts() {
    let h = harness();
    post_json(&h.router, "/request-download", download_form("minimum_wages")).await;

    let (status, body, _) = get(&h.router, "/db-status").await;
    assert_eq!(status, StatusCode::OK);
    let body = json_body(&body);
    assert_eq!(body["tables"]["downloads"], 1);
    assert_eq!(body["tables"]["download_stats"], 1);
}

#[tokio::test]
async fn test_metrics_disabled() {
    let h = harness();
    let (status, _, _) = get(&h.router, "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
