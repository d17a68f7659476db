//! # HTTP Server Module
//!
//! Axum server exposing the rental property API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/` - API index
//! - `<api_prefix>/properties` - Property CRUD

pub mod config;
pub mod errors;
pub mod property_routes;
pub mod server;
pub mod service_routes;

pub use config::{ConfigError, HttpServerConfig};
pub use errors::{ApiError, ApiResult};
pub use property_routes::PropertyState;
pub use server::HttpServer;
