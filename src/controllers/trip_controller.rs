use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::dto::trip_dto::{TripDeliveryItem, TripDetailResponse, TripListItem};
use crate::models::trip::{Trip, TripStatus};
use crate::repositories::delivery_repository::DeliveryRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::services::trip_service::TripService;
use crate::utils::errors::{not_found_error, AppError};

pub struct TripController {
    trips: TripService,
    repository: TripRepository,
    deliveries: DeliveryRepository,
}

impl TripController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            trips: TripService::new(pool.clone()),
            repository: TripRepository::new(pool.clone()),
            deliveries: DeliveryRepository::new(pool),
        }
    }

    /// Listado de viajes con conductor, empresa y total de repartos. Un
    /// viaje sin repartos lista con total cero.
    pub async fn list(&self) -> Result<Vec<TripListItem>, AppError> {
        let rows = self.repository.list_with_stats().await?;

        let response = rows
            .into_iter()
            .map(|row| TripListItem {
                id: row.id,
                display_code: row.display_code,
                driver_name: row.driver_name,
                driver_company_name: row.driver_company_name,
                vehicle_description: row.vehicle_description,
                planned_start_at: row.planned_start_at,
                planned_end_at: row.planned_end_at,
                status: row.status,
                delivery_count: row.delivery_count,
            })
            .collect();

        Ok(response)
    }

    /// Detalle del viaje con sus repartos ordenados por código.
    pub async fn detail(&self, id: Uuid) -> Result<TripDetailResponse, AppError> {
        let row = self
            .repository
            .find_detail(id)
            .await?
            .ok_or_else(|| not_found_error("Trip", &id.to_string()))?;

        let deliveries = self
            .deliveries
            .find_by_trip(id)
            .await?
            .into_iter()
            .map(|d| TripDeliveryItem {
                id: d.delivery.id,
                display_code: d.delivery.display_code,
                destination: d.delivery.destination,
                driver_name: d.driver_name,
                status: d.delivery.status,
                start_at: d.delivery.start_at,
                estimated_end_at: d.delivery.estimated_end_at,
                ended_at: d.delivery.ended_at,
                notes: d.delivery.notes,
            })
            .collect();

        Ok(TripDetailResponse {
            trip: row.trip,
            driver_name: row.driver_name,
            driver_company_name: row.driver_company_name,
            deliveries,
        })
    }

    pub async fn transition(
        &self,
        id: Uuid,
        target: TripStatus,
    ) -> Result<ApiResponse<Trip>, AppError> {
        let updated = self.trips.transition(id, target).await?;

        let message = format!(
            "Viaje #{:04} ahora está '{}'",
            updated.display_code,
            updated.status.as_str()
        );
        Ok(ApiResponse::success_with_message(updated, message))
    }
}
