use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::assignment_dto::{BatchAssignmentRequest, BatchAssignmentResponse};
use crate::dto::common::ApiResponse;
use crate::services::assignment_service::AssignmentService;
use crate::utils::errors::AppError;

pub struct AssignmentController {
    assignments: AssignmentService,
}

impl AssignmentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            assignments: AssignmentService::new(pool),
        }
    }

    pub async fn assign_batch(
        &self,
        owner_user_id: Uuid,
        request: BatchAssignmentRequest,
    ) -> Result<ApiResponse<BatchAssignmentResponse>, AppError> {
        let outcome = self.assignments.assign_batch(request, owner_user_id).await?;

        let message = if outcome.deliveries.is_empty() {
            format!(
                "Viaje #{:04} creado sin repartos: ningún cliente seleccionado tenía una dirección válida",
                outcome.trip.display_code
            )
        } else {
            format!(
                "{} reparto(s) creado(s) exitosamente en el viaje #{:04}",
                outcome.deliveries.len(),
                outcome.trip.display_code
            )
        };

        let response = BatchAssignmentResponse {
            trip_id: outcome.trip.id,
            trip_display_code: outcome.trip.display_code,
            deliveries_created: outcome.deliveries.len(),
            skipped: outcome.skipped,
        };

        Ok(ApiResponse::success_with_message(response, message))
    }
}
