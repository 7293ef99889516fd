use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::trip_controller::TripController;
use crate::dto::common::ApiResponse;
use crate::dto::trip_dto::{TripDetailResponse, TripListItem, TripTransitionRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::trip::Trip;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips))
        .route("/:id", get(get_trip_detail))
        .route("/:id/status", patch(transition_trip))
}

async fn list_trips(State(state): State<AppState>) -> Result<Json<Vec<TripListItem>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_trip_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripDetailResponse>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.detail(id).await?;
    Ok(Json(response))
}

async fn transition_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(_user): Extension<AuthenticatedUser>,
    Json(request): Json<TripTransitionRequest>,
) -> Result<Json<ApiResponse<Trip>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.transition(id, request.target_status).await?;
    Ok(Json(response))
}
