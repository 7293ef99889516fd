use axum::{
    extract::{Path, State},
    routing::{get, patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::controllers::delivery_controller::DeliveryController;
use crate::dto::common::ApiResponse;
use crate::dto::delivery_dto::{
    CreateDeliveryRequest, DeliveryCreatedResponse, DeliveryListItem, DeliveryTransitionRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::delivery::Delivery;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_delivery_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_delivery))
        .route("/", get(list_deliveries))
        .route("/:id/status", patch(transition_delivery))
}

async fn create_delivery(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateDeliveryRequest>,
) -> Result<Json<ApiResponse<DeliveryCreatedResponse>>, AppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let controller = DeliveryController::new(state.pool.clone());
    let response = controller.create(user.user_id, request).await?;
    Ok(Json(response))
}

async fn list_deliveries(
    State(state): State<AppState>,
) -> Result<Json<Vec<DeliveryListItem>>, AppError> {
    let controller = DeliveryController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn transition_delivery(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(_user): Extension<AuthenticatedUser>,
    Json(request): Json<DeliveryTransitionRequest>,
) -> Result<Json<ApiResponse<Delivery>>, AppError> {
    let controller = DeliveryController::new(state.pool.clone());
    let response = controller.transition(id, request.target_status).await?;
    Ok(Json(response))
}
