use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::dto::kunde_dto::KundeRequest;
use crate::models::{Buchung, Kunde};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_kunde_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_kunden).post(create_kunde))
        .route(
            "/:id",
            get(get_kunde).put(update_kunde).delete(delete_kunde),
        )
        .route("/:id/buchungen", get(list_kunde_buchungen))
}

async fn list_kunden(State(state): State<AppState>) -> Result<Json<Vec<Kunde>>, AppError> {
    Ok(Json(state.kunde_service.find_all().await?))
}

async fn get_kunde(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Kunde>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.kunde_service.find_by_id(id).await?))
}

async fn create_kunde(
    State(state): State<AppState>,
    payload: Result<Json<KundeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let kunde = state.kunde_service.create(request).await?;
    let location = format!("/api/kunden/{}", kunde.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(kunde)))
}

async fn update_kunde(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<KundeRequest>, JsonRejection>,
) -> Result<Json<Kunde>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    Ok(Json(state.kunde_service.update(id, request).await?))
}

async fn delete_kunde(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.kunde_service.delete_by_id(id).await?;
    Ok(StatusCode::OK)
}

async fn list_kunde_buchungen(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<Buchung>>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.kunde_service.find_buchungen(id).await?))
}
