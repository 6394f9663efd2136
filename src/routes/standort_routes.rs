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

use crate::dto::standort_dto::StandortRequest;
use crate::models::{Fahrzeug, Standort};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_standort_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_standorte).post(create_standort))
        .route(
            "/:id",
            get(get_standort).put(update_standort).delete(delete_standort),
        )
        .route("/:id/fahrzeuge", get(list_standort_fahrzeuge))
}

async fn list_standorte(State(state): State<AppState>) -> Result<Json<Vec<Standort>>, AppError> {
    Ok(Json(state.standort_service.find_all().await?))
}

async fn get_standort(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Standort>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.standort_service.find_by_id(id).await?))
}

async fn create_standort(
    State(state): State<AppState>,
    payload: Result<Json<StandortRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let standort = state.standort_service.create(request).await?;
    let location = format!("/api/standorte/{}", standort.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(standort)))
}

async fn update_standort(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<StandortRequest>, JsonRejection>,
) -> Result<Json<Standort>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    Ok(Json(state.standort_service.update(id, request).await?))
}

async fn delete_standort(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.standort_service.delete_by_id(id).await?;
    Ok(StatusCode::OK)
}

/// Vehicles stationed at one location
async fn list_standort_fahrzeuge(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<Fahrzeug>>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.fahrzeug_service.find_by_standort(id).await?))
}
