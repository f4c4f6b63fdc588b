//! HTTP routes.
//!
//! - `GET  /health`
//! - `GET  /api/products?category=<c>`
//! - `POST /api/ask` with `{"query": "..."}`

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use catalog::Product;

use crate::error::AskError;
use crate::orchestrator::{AskOrchestrator, AskResponse};

#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

/// Build the application router around a ready orchestrator.
pub fn app_router(orchestrator: AskOrchestrator) -> Router {
    let api = Router::new()
        .route("/products", get(list_products))
        .route("/ask", post(ask));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(orchestrator)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_products(
    State(orchestrator): State<AskOrchestrator>,
    Query(params): Query<ProductsQuery>,
) -> Json<Vec<Product>> {
    Json(orchestrator.list_products(params.category.as_deref()))
}

async fn ask(
    State(orchestrator): State<AskOrchestrator>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, AskError> {
    let response = orchestrator.answer_query(&request.query).await?;
    Ok(Json(response))
}
