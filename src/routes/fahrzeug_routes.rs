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

use crate::dto::fahrzeug_dto::FahrzeugRequest;
use crate::models::Fahrzeug;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fahrzeug_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_fahrzeuge).post(create_fahrzeug))
        .route(
            "/:id",
            get(get_fahrzeug).put(update_fahrzeug).delete(delete_fahrzeug),
        )
}

async fn list_fahrzeuge(State(state): State<AppState>) -> Result<Json<Vec<Fahrzeug>>, AppError> {
    Ok(Json(state.fahrzeug_service.find_all().await?))
}

async fn get_fahrzeug(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Fahrzeug>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.fahrzeug_service.find_by_id(id).await?))
}

async fn create_fahrzeug(
    State(state): State<AppState>,
    payload: Result<Json<FahrzeugRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let fahrzeug = state.fahrzeug_service.create(request).await?;
    let location = format!("/api/fahrzeuge/{}", fahrzeug.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(fahrzeug)))
}

async fn update_fahrzeug(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<FahrzeugRequest>, JsonRejection>,
) -> Result<Json<Fahrzeug>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    Ok(Json(state.fahrzeug_service.update(id, request).await?))
}

async fn delete_fahrzeug(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.fahrzeug_service.delete_by_id(id).await?;
    Ok(StatusCode::OK)
}
