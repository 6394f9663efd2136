use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::dto::buchung_dto::{BuchungRequest, VerfuegbarkeitRequest, VerfuegbarkeitResponse};
use crate::models::{Buchung, BuchungDetails};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Mounted under `/api/buchungen` and the older `/buchungen`.
pub fn create_buchung_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_buchungen).post(create_buchung))
        .route("/check-availability", post(check_availability))
        .route(
            "/:id",
            get(get_buchung).put(update_buchung).delete(delete_buchung),
        )
        .route("/:id/details", get(get_buchung_details))
}

async fn list_buchungen(State(state): State<AppState>) -> Result<Json<Vec<Buchung>>, AppError> {
    Ok(Json(state.buchung_service.find_all().await?))
}

async fn get_buchung(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Buchung>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.buchung_service.find_by_id(id).await?))
}

async fn create_buchung(
    State(state): State<AppState>,
    payload: Result<Json<BuchungRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let buchung = state.buchung_service.create(request).await?;
    let location = format!("/api/buchungen/{}", buchung.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(buchung)))
}

async fn update_buchung(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<BuchungRequest>, JsonRejection>,
) -> Result<Json<Buchung>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    Ok(Json(state.buchung_service.update(id, request).await?))
}

async fn delete_buchung(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.buchung_service.delete_by_id(id).await?;
    Ok(StatusCode::OK)
}

async fn get_buchung_details(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<BuchungDetails>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.buchung_service.find_details(id).await?))
}

async fn check_availability(
    State(state): State<AppState>,
    payload: Result<Json<VerfuegbarkeitRequest>, JsonRejection>,
) -> Result<Json<VerfuegbarkeitResponse>, AppError> {
    let Json(request) = payload?;
    Ok(Json(state.buchung_service.check_availability(request).await?))
}
