use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::dto::delivery_dto::{
    CreateDeliveryRequest, DeliveryCreatedResponse, DeliveryListItem,
};
use crate::models::delivery::{Delivery, DeliveryStatus};
use crate::repositories::delivery_repository::DeliveryRepository;
use crate::services::assignment_service::AssignmentService;
use crate::services::delivery_service::DeliveryService;
use crate::utils::errors::AppError;

pub struct DeliveryController {
    assignments: AssignmentService,
    deliveries: DeliveryService,
    repository: DeliveryRepository,
}

impl DeliveryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            assignments: AssignmentService::new(pool.clone()),
            deliveries: DeliveryService::new(pool.clone()),
            repository: DeliveryRepository::new(pool),
        }
    }

    /// Alta individual: crea el viaje que respalda al reparto y el reparto.
    pub async fn create(
        &self,
        owner_user_id: Uuid,
        request: CreateDeliveryRequest,
    ) -> Result<ApiResponse<DeliveryCreatedResponse>, AppError> {
        let (trip, delivery) = self.assignments.create_single(request, owner_user_id).await?;

        let message = format!(
            "El nuevo reparto ha sido registrado y asignado al viaje #{:04}",
            trip.display_code
        );
        let response = DeliveryCreatedResponse {
            trip_id: trip.id,
            trip_display_code: trip.display_code,
            delivery_id: delivery.id,
            delivery_display_code: delivery.display_code,
        };

        Ok(ApiResponse::success_with_message(response, message))
    }

    pub async fn list(&self) -> Result<Vec<DeliveryListItem>, AppError> {
        let rows = self.repository.list_with_driver().await?;

        let response = rows
            .into_iter()
            .map(|row| DeliveryListItem {
                id: row.delivery.id,
                display_code: row.delivery.display_code,
                trip_id: row.delivery.trip_id,
                destination: row.delivery.destination,
                driver_name: row.driver_name,
                vehicle_description: row.delivery.vehicle_description,
                status: row.delivery.status,
                start_at: row.delivery.start_at,
                estimated_end_at: row.delivery.estimated_end_at,
                ended_at: row.delivery.ended_at,
                notes: row.delivery.notes,
            })
            .collect();

        Ok(response)
    }

    pub async fn transition(
        &self,
        id: Uuid,
        target: DeliveryStatus,
    ) -> Result<ApiResponse<Delivery>, AppError> {
        let updated = self.deliveries.transition(id, target).await?;

        let message = format!(
            "Reparto #{:04} ahora está '{}'",
            updated.display_code,
            updated.status.as_str()
        );
        Ok(ApiResponse::success_with_message(updated, message))
    }
}
