//! Ciclo de vida del reparto
//!
//! Inserta los repartos de un lote y aplica transiciones validadas contra la
//! tabla cerrada de DeliveryStatus, independiente de la del viaje padre.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::delivery::{Delivery, DeliveryStatus, NewDelivery};
use crate::repositories::delivery_repository::DeliveryRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct DeliveryService {
    deliveries: DeliveryRepository,
}

impl DeliveryService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            deliveries: DeliveryRepository::new(pool),
        }
    }

    /// Insertar las filas ya construidas y validadas del lote, en una sola
    /// escritura, dentro del executor dado.
    pub async fn create_batch(
        &self,
        executor: impl sqlx::PgExecutor<'_>,
        rows: &[NewDelivery],
    ) -> Result<Vec<Delivery>, AppError> {
        let created = self.deliveries.insert_batch(executor, rows).await?;
        if !created.is_empty() {
            log::info!("📦 {} reparto(s) insertado(s)", created.len());
        }
        Ok(created)
    }

    pub async fn transition(
        &self,
        delivery_id: Uuid,
        target: DeliveryStatus,
    ) -> Result<Delivery, AppError> {
        let delivery = self
            .deliveries
            .find_by_id(delivery_id)
            .await?
            .ok_or_else(|| not_found_error("Delivery", &delivery_id.to_string()))?;

        delivery.status.validate_transition(target)?;

        // La cancelación fija ended_at al momento de cancelar; completar
        // también cierra la fila. Ambos estados son definitivos.
        let ended_at = target.is_terminal().then(Utc::now);
        let updated = self
            .deliveries
            .update_status(delivery_id, delivery.status, target, ended_at)
            .await?;

        log::info!(
            "🔁 Reparto #{:04}: '{}' -> '{}'",
            updated.display_code,
            delivery.status.as_str(),
            updated.status.as_str()
        );
        Ok(updated)
    }
}
