//! Service HTTP Routes
//!
//! Health check, API index and the catch-all for unmatched routes.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{OriginalUri, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;

use crate::property::model::iso_millis;

use super::errors::ApiError;

/// Process-level facts reported by the service routes
#[derive(Debug)]
pub struct ServiceInfo {
    started: Instant,
    environment: String,
    properties_path: String,
}

impl ServiceInfo {
    pub fn new(environment: impl Into<String>, api_prefix: &str) -> Self {
        Self {
            started: Instant::now(),
            environment: environment.into(),
            properties_path: format!("{}/properties", api_prefix.trim_end_matches('/')),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    /// Seconds since the router was built
    pub uptime: f64,
    pub version: &'static str,
    pub environment: String,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: IndexEndpoints,
}

#[derive(Debug, Serialize)]
pub struct IndexEndpoints {
    pub health: &'static str,
    pub properties: String,
    pub docs: &'static str,
}

/// Create service routes, mounted at the root
pub fn service_routes(info: Arc<ServiceInfo>) -> Router {
    Router::new()
        .route("/health", get(health_handler).fallback(route_not_found))
        .route("/", get(index_handler).fallback(route_not_found))
        .with_state(info)
}

async fn health_handler(State(info): State<Arc<ServiceInfo>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: iso_millis::format(&Utc::now()),
        uptime: info.started.elapsed().as_secs_f64(),
        version: env!("CARGO_PKG_VERSION"),
        environment: info.environment.clone(),
    })
}

async fn index_handler(State(info): State<Arc<ServiceInfo>>) -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Rental Property API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: IndexEndpoints {
            health: "/health",
            properties: info.properties_path.clone(),
            docs: "See README.md for API documentation",
        },
    })
}

/// 404 for any path or method without a handler
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::route_not_found(&uri)
}
