//! HTTP middleware
//!
//! Bearer token guard and CORS.

pub mod auth;
pub mod cors;

pub use auth::require_auth;
pub use cors::cors_layer;
