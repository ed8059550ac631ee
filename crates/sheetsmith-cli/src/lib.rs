//! Sheetsmith server library
//!
//! Configuration loading and the HTTP API router, kept in a library so
//! integration tests can drive the router without binding a socket.

pub mod api;
pub mod config;

pub use api::{create_router, AppState, ErrorResponse, HealthResponse, PreviewResponse,
    ShareRequest, ShareResponse};
pub use config::{Config, API_KEY_ENV};
