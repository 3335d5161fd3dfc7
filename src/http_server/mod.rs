//! # HTTP Server Module
//!
//! Axum-based HTTP server exposing the items API as JSON.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/items` - List and create items
//! - `/api/items/{key}` - Get, update, and delete one item

pub mod config;
pub mod errors;
pub mod health_routes;
pub mod item_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
