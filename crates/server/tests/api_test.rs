//! End-to-end tests: HTTP API → orchestrator → stub model server.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use catalog::{Catalog, Product};
use llm_client::{FALLBACK_SUMMARY, LlmClient};
use serde_json::{Value, json};
use server::{AskOrchestrator, AskResponse, ErrorResponse, app_router};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Clone)]
struct StubModel {
    status: StatusCode,
    body: String,
    calls: Arc<AtomicUsize>,
}

impl StubModel {
    fn answering(answer: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: json!({"model": "test-model", "response": answer, "done": true}).to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing(status: StatusCode) -> Self {
        Self {
            status,
            body: "model not loaded".to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

async fn generate(State(stub): State<StubModel>, Json(_request): Json<Value>) -> (StatusCode, String) {
    stub.calls.fetch_add(1, Ordering::SeqCst);
    (stub.status, stub.body.clone())
}

async fn serve(app: Router) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to get local address");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    (format!("http://{}", addr), handle)
}

fn build_test_catalog() -> Arc<Catalog> {
    let product = |id: i64, name: &str, category: &str, price: f64, tags: &[&str]| Product {
        id,
        name: name.to_string(),
        description: format!("A {} in {}", name.to_lowercase(), category.to_lowercase()),
        category: category.to_string(),
        price,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    };

    let catalog = Catalog::from_products(vec![
        product(1, "Wireless Mouse", "Electronics", 25.0, &["wireless", "mouse"]),
        product(2, "Gaming Keyboard", "Electronics", 89.0, &["gaming", "keyboard"]),
        product(3, "Running Shoes", "Footwear", 79.0, &["running", "shoes"]),
    ])
    .expect("valid test catalog");
    Arc::new(catalog)
}

/// Start a stub model and the API in front of it
async fn start_app(stub: StubModel) -> (String, Vec<JoinHandle<()>>) {
    let model = Router::new()
        .route("/api/generate", post(generate))
        .with_state(stub);
    let (model_addr, model_handle) = serve(model).await;

    let client = LlmClient::new(model_addr, "test-model").unwrap();
    let orchestrator = AskOrchestrator::new(build_test_catalog(), client);
    let (api_addr, api_handle) = serve(app_router(orchestrator)).await;

    (api_addr, vec![model_handle, api_handle])
}

fn stop(handles: Vec<JoinHandle<()>>) {
    for handle in handles {
        handle.abort();
    }
}

async fn ask(base: &str, query: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/api/ask", base))
        .json(&json!({ "query": query }))
        .send()
        .await
        .expect("ask request failed")
}

// ============================================================================
// /api/products
// ============================================================================

#[tokio::test]
async fn test_list_all_products() {
    let (base, handles) = start_app(StubModel::answering("{}")).await;

    let response = reqwest::get(format!("{}/api/products", base)).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let products: Vec<Product> = response.json().await.unwrap();
    let ids: Vec<_> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    stop(handles);
}

#[tokio::test]
async fn test_list_products_by_category() {
    let (base, handles) = start_app(StubModel::answering("{}")).await;

    let products: Vec<Product> = reqwest::get(format!("{}/api/products?category=electronics", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|p| p.category == "Electronics"));

    stop(handles);
}

#[tokio::test]
async fn test_health() {
    let (base, handles) = start_app(StubModel::answering("{}")).await;

    let body: Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"status": "ok"}));

    stop(handles);
}

// ============================================================================
// /api/ask
// ============================================================================

#[tokio::test]
async fn test_ask_maps_ids_to_products() {
    let stub = StubModel::answering(r#"{"productIds": [1, 999], "summary": "The wireless mouse fits."}"#);
    let calls = stub.calls.clone();
    let (base, handles) = start_app(stub).await;

    let response = ask(&base, "wireless mouse under 30").await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: AskResponse = response.json().await.unwrap();
    assert_eq!(body.products.len(), 1);
    assert_eq!(body.products[0].id, 1);
    assert_eq!(body.products[0].name, "Wireless Mouse");
    assert_eq!(body.summary, "The wireless mouse fits.");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    stop(handles);
}

#[tokio::test]
async fn test_ask_empty_query_is_bad_request() {
    let stub = StubModel::answering("{}");
    let calls = stub.calls.clone();
    let (base, handles) = start_app(stub).await;

    let response = ask(&base, "   ").await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.detail, "Query cannot be empty");
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    stop(handles);
}

#[tokio::test]
async fn test_ask_without_candidates_returns_fallback() {
    let stub = StubModel::answering(r#"{"productIds": [1], "summary": "unused"}"#);
    let calls = stub.calls.clone();
    let (base, handles) = start_app(stub).await;

    let body: AskResponse = ask(&base, "telescope").await.json().await.unwrap();
    assert!(body.products.is_empty());
    assert_eq!(body.summary, FALLBACK_SUMMARY);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    stop(handles);
}

#[tokio::test]
async fn test_ask_model_failure_is_bad_gateway() {
    let (base, handles) = start_app(StubModel::failing(StatusCode::SERVICE_UNAVAILABLE)).await;

    let response = ask(&base, "gaming keyboard").await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);

    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.detail, "AI Error: AI service unavailable (HTTP 503)");

    stop(handles);
}

#[tokio::test]
async fn test_ask_malformed_model_output_is_bad_gateway() {
    let (base, handles) = start_app(StubModel::answering("not json")).await;

    let response = ask(&base, "running shoes").await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);

    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.detail, "AI Error: AI returned invalid data format");

    stop(handles);
}

#[tokio::test]
async fn test_ask_missing_query_field_is_rejected() {
    let (base, handles) = start_app(StubModel::answering("{}")).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/ask", base))
        .json(&json!({ "question": "mouse" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());

    stop(handles);
}
