use axum::{extract::State, routing::post, Extension, Json, Router};
use validator::Validate;

use crate::controllers::assignment_controller::AssignmentController;
use crate::dto::assignment_dto::{BatchAssignmentRequest, BatchAssignmentResponse};
use crate::dto::common::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_assignment_router() -> Router<AppState> {
    Router::new().route("/batch", post(assign_batch))
}

async fn assign_batch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<BatchAssignmentRequest>,
) -> Result<Json<ApiResponse<BatchAssignmentResponse>>, AppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.assign_batch(user.user_id, request).await?;
    Ok(Json(response))
}
