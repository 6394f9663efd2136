//! Bearer token guard
//!
//! Rejects requests without a valid `Authorization: Bearer <token>` header.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::extract_token_from_header;

pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization header fehlt".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = state.auth_service.verify(token)?;

    tracing::debug!(username = %claims.sub, path = %request.uri().path(), "🔑 Token akzeptiert");

    Ok(next.run(request).await)
}
