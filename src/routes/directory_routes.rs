use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::directory_controller::DirectoryController;
use crate::dto::directory_dto::{ClientOption, CompanyOption, DriverOption};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_directory_router() -> Router<AppState> {
    Router::new()
        .route("/companies", get(list_companies))
        .route("/companies/:id/clients", get(list_clients))
        .route("/drivers", get(list_active_drivers))
}

async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyOption>>, AppError> {
    let controller = DirectoryController::new(state.pool.clone());
    let response = controller.list_companies().await?;
    Ok(Json(response))
}

async fn list_clients(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ClientOption>>, AppError> {
    let controller = DirectoryController::new(state.pool.clone());
    let response = controller.list_clients(id).await?;
    Ok(Json(response))
}

async fn list_active_drivers(
    State(state): State<AppState>,
) -> Result<Json<Vec<DriverOption>>, AppError> {
    let controller = DirectoryController::new(state.pool.clone());
    let response = controller.list_active_drivers().await?;
    Ok(Json(response))
}
