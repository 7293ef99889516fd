use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::delivery::{Delivery, DeliveryStatus, NewDelivery};
use crate::utils::errors::AppError;

/// Reparto con el nombre del conductor resuelto
#[derive(Debug, FromRow)]
pub struct DeliveryWithDriverRow {
    #[sqlx(flatten)]
    pub delivery: Delivery,
    pub driver_name: Option<String>,
}

pub struct DeliveryRepository {
    pool: PgPool,
}

impl DeliveryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar el lote completo en una sola escritura (UNNEST de arrays
    /// paralelos). Recibe el executor para correr dentro de la transacción
    /// del orquestador. Los display_code salen de la secuencia del store.
    pub async fn insert_batch(
        &self,
        executor: impl sqlx::PgExecutor<'_>,
        rows: &[NewDelivery],
    ) -> Result<Vec<Delivery>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|_| Uuid::new_v4()).collect();
        let trip_ids: Vec<Option<Uuid>> = rows.iter().map(|r| r.trip_id).collect();
        let driver_ids: Vec<Uuid> = rows.iter().map(|r| r.driver_id).collect();
        let vehicles: Vec<String> = rows.iter().map(|r| r.vehicle_description.clone()).collect();
        let destinations: Vec<String> = rows.iter().map(|r| r.destination.clone()).collect();
        let starts: Vec<DateTime<Utc>> = rows.iter().map(|r| r.start_at).collect();
        let estimated_ends: Vec<Option<DateTime<Utc>>> =
            rows.iter().map(|r| r.estimated_end_at).collect();
        let notes: Vec<Option<String>> = rows.iter().map(|r| r.notes.clone()).collect();
        let owners: Vec<Uuid> = rows.iter().map(|r| r.owner_user_id).collect();

        let created = sqlx::query_as::<_, Delivery>(
            r#"
            INSERT INTO deliveries (
                id, trip_id, driver_id, vehicle_description, destination,
                start_at, estimated_end_at, status, notes, owner_user_id
            )
            SELECT u.id, u.trip_id, u.driver_id, u.vehicle_description, u.destination,
                   u.start_at, u.estimated_end_at, 'pending', u.notes, u.owner_user_id
            FROM UNNEST(
                $1::uuid[], $2::uuid[], $3::uuid[], $4::text[], $5::text[],
                $6::timestamptz[], $7::timestamptz[], $8::text[], $9::uuid[]
            ) AS u(
                id, trip_id, driver_id, vehicle_description, destination,
                start_at, estimated_end_at, notes, owner_user_id
            )
            RETURNING *
            "#,
        )
        .bind(&ids)
        .bind(&trip_ids)
        .bind(&driver_ids)
        .bind(&vehicles)
        .bind(&destinations)
        .bind(&starts)
        .bind(&estimated_ends)
        .bind(&notes)
        .bind(&owners)
        .fetch_all(executor)
        .await
        .map_err(|e| AppError::StoreWrite(format!("Error insertando lote de repartos: {}", e)))?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Delivery>, AppError> {
        let delivery = sqlx::query_as::<_, Delivery>("SELECT * FROM deliveries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error buscando reparto: {}", e)))?;

        Ok(delivery)
    }

    /// Aplicar una transición ya validada, con guarda sobre el estado origen.
    pub async fn update_status(
        &self,
        id: Uuid,
        from: DeliveryStatus,
        to: DeliveryStatus,
        ended_at: Option<DateTime<Utc>>,
    ) -> Result<Delivery, AppError> {
        let updated = sqlx::query_as::<_, Delivery>(
            r#"
            UPDATE deliveries
            SET status = $3, ended_at = COALESCE($4, ended_at), updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .bind(ended_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::StoreWrite(format!("Error actualizando estado del reparto: {}", e))
        })?;

        updated.ok_or_else(|| {
            AppError::Conflict("el reparto cambió de estado de forma concurrente".to_string())
        })
    }

    /// Listado general de repartos, el más reciente primero.
    pub async fn list_with_driver(&self) -> Result<Vec<DeliveryWithDriverRow>, AppError> {
        let rows = sqlx::query_as::<_, DeliveryWithDriverRow>(
            r#"
            SELECT dv.*, d.full_name AS driver_name
            FROM deliveries dv
            LEFT JOIN drivers d ON d.id = dv.driver_id
            ORDER BY dv.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listando repartos: {}", e)))?;

        Ok(rows)
    }

    /// Repartos de un viaje ordenados por código, para el detalle.
    pub async fn find_by_trip(&self, trip_id: Uuid) -> Result<Vec<DeliveryWithDriverRow>, AppError> {
        let rows = sqlx::query_as::<_, DeliveryWithDriverRow>(
            r#"
            SELECT dv.*, d.full_name AS driver_name
            FROM deliveries dv
            LEFT JOIN drivers d ON d.id = dv.driver_id
            WHERE dv.trip_id = $1
            ORDER BY dv.display_code ASC
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listando repartos del viaje: {}", e)))?;

        Ok(rows)
    }
}
