//! Ciclo de vida del viaje
//!
//! Crea viajes en estado planificado y aplica transiciones validadas contra
//! la tabla cerrada de TripStatus. La transición de un viaje nunca toca sus
//! repartos: cada reparto gobierna su propio estado.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::trip::{NewTrip, Trip, TripStatus};
use crate::repositories::trip_repository::TripRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::validate_not_empty;

pub struct TripService {
    trips: TripRepository,
}

impl TripService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            trips: TripRepository::new(pool),
        }
    }

    /// Crear un viaje nuevo dentro del executor dado (la transacción del
    /// orquestador). El viaje nace planificado con código asignado por el
    /// store.
    pub async fn create(
        &self,
        executor: impl sqlx::PgExecutor<'_>,
        new_trip: &NewTrip,
    ) -> Result<Trip, AppError> {
        validate_not_empty(&new_trip.vehicle_description).map_err(|_| {
            AppError::Validation("la descripción del vehículo es requerida".to_string())
        })?;

        let trip = self.trips.create(executor, new_trip).await?;
        log::info!(
            "🚚 Viaje #{:04} creado en estado '{}'",
            trip.display_code,
            trip.status.as_str()
        );
        Ok(trip)
    }

    pub async fn transition(&self, trip_id: Uuid, target: TripStatus) -> Result<Trip, AppError> {
        let trip = self
            .trips
            .find_by_id(trip_id)
            .await?
            .ok_or_else(|| not_found_error("Trip", &trip_id.to_string()))?;

        trip.status.validate_transition(target)?;

        let ended_at = target.is_terminal().then(Utc::now);
        let updated = self
            .trips
            .update_status(trip_id, trip.status, target, ended_at)
            .await?;

        log::info!(
            "🔁 Viaje #{:04}: '{}' -> '{}'",
            updated.display_code,
            trip.status.as_str(),
            updated.status.as_str()
        );
        Ok(updated)
    }
}
