//! HTTP routes
//!
//! One router per entity, nested under `/api`, plus `/login` and `/health`.

pub mod auth_routes;
pub mod buchung_routes;
pub mod fahrzeug_routes;
pub mod kunde_routes;
pub mod standort_routes;

use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer, middleware, routing::get, BoxError, Json, Router,
};
use serde_json::{json, Value};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::config::environment::EnvironmentConfig;
use crate::middleware::{cors_layer, require_auth};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub use auth_routes::create_auth_router;
pub use buchung_routes::create_buchung_router;
pub use fahrzeug_routes::create_fahrzeug_router;
pub use kunde_routes::create_kunde_router;
pub use standort_routes::create_standort_router;

/// Build the complete application router
pub fn create_router(state: AppState, config: &EnvironmentConfig) -> Router {
    let api = Router::new()
        .nest("/kunden", create_kunde_router())
        .nest("/fahrzeuge", create_fahrzeug_router())
        .nest("/standorte", create_standort_router())
        .nest("/buchungen", create_buchung_router());

    let mut protected = Router::new()
        .nest("/api", api)
        .nest("/buchungen", create_buchung_router());

    if state.auth_required {
        protected = protected.layer(middleware::from_fn_with_state(state.clone(), require_auth));
    }

    Router::new()
        .route("/health", get(health_check))
        .merge(create_auth_router())
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.cors_origins))
                .layer(CompressionLayer::new())
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.request_timeout_secs,
                ))),
        )
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn handle_timeout_error(error: BoxError) -> AppError {
    if error.is::<tower::timeout::error::Elapsed>() {
        AppError::Timeout
    } else {
        AppError::Internal(error.to_string())
    }
}
