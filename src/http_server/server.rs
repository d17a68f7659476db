//! # HTTP Server
//!
//! Combines the property and service routers behind CORS and request
//! tracing, and runs them on a TCP listener.

use std::io;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, warn, Level};

use crate::property::{InMemoryPropertyStore, PropertyStore};

use super::config::HttpServerConfig;
use super::property_routes::{property_routes, PropertyState};
use super::service_routes::{route_not_found, service_routes, ServiceInfo};

/// HTTP server for the property API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a new HTTP server with a fresh in-memory store
    pub fn with_config(config: HttpServerConfig) -> Self {
        Self::with_store(config, InMemoryPropertyStore::new())
    }

    /// Create a new HTTP server backed by `store`
    pub fn with_store<S: PropertyStore + 'static>(config: HttpServerConfig, store: S) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router<S: PropertyStore + 'static>(config: &HttpServerConfig, store: S) -> Router {
        let property_state = Arc::new(PropertyState::new(store));
        let service_info = Arc::new(ServiceInfo::new(&config.environment, &config.api_prefix));

        let properties = property_routes(property_state);
        let router = if config.mounts_at_root() {
            Router::new().merge(properties)
        } else {
            Router::new().nest(&config.api_prefix, properties)
        };

        router
            .merge(service_routes(service_info))
            .fallback(route_not_found)
            .layer(Self::trace_layer())
            .layer(Self::cors_layer(config))
    }

    /// One span and one completion event per request, visible at `info`
    fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO))
    }

    fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
        if config.cors_origins.is_empty() {
            return CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
        }

        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(%origin, "ignoring unparsable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the configured host and port. Hostnames are resolved.
    pub async fn bind(&self) -> io::Result<TcpListener> {
        TcpListener::bind((self.config.host.as_str(), self.config.port))
            .await
            .map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("Failed to bind {}: {}", self.config.socket_addr(), e),
                )
            })
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> io::Result<()> {
        let listener = self.bind().await?;
        let addr = listener.local_addr()?;
        info!(%addr, "rental property API listening");
        info!(
            "properties at http://{}{}/properties, health at http://{}/health",
            addr,
            self.config.api_prefix.trim_end_matches('/'),
            addr
        );

        axum::serve(listener, self.router).await
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new();
        assert_eq!(server.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig::with_port(8080);
        let server = HttpServer::with_config(config);
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_at_root() {
        let config = HttpServerConfig {
            api_prefix: String::new(),
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::with_config(config).router();
    }

    #[tokio::test]
    async fn test_start_rejects_bad_address() {
        let config = HttpServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        let err = HttpServer::with_config(config).start().await.unwrap_err();
        assert!(err.to_string().contains("not a host:3000"));
    }

    #[tokio::test]
    async fn test_bind_resolves_hostname() {
        let config = HttpServerConfig {
            host: "localhost".to_string(),
            port: 0,
            ..Default::default()
        };
        let listener = HttpServer::with_config(config).bind().await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }
}
