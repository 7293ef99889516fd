use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::trip::{NewTrip, Trip, TripStatus};
use crate::utils::errors::AppError;

/// Fila del listado de viajes: viaje + conductor + empresa + total de repartos
#[derive(Debug, FromRow)]
pub struct TripListRow {
    pub id: Uuid,
    pub display_code: i32,
    pub driver_name: Option<String>,
    pub driver_company_name: Option<String>,
    pub vehicle_description: String,
    pub planned_start_at: DateTime<Utc>,
    pub planned_end_at: Option<DateTime<Utc>>,
    pub status: TripStatus,
    pub delivery_count: i64,
}

/// Viaje con la identidad del conductor resuelta para el detalle
#[derive(Debug, FromRow)]
pub struct TripDetailRow {
    #[sqlx(flatten)]
    pub trip: Trip,
    pub driver_name: Option<String>,
    pub driver_company_name: Option<String>,
}

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar un viaje nuevo en estado planificado. Recibe el executor para
    /// poder correr dentro de la transacción del orquestador; el display_code
    /// lo asigna la secuencia del store.
    pub async fn create(
        &self,
        executor: impl sqlx::PgExecutor<'_>,
        new_trip: &NewTrip,
    ) -> Result<Trip, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (
                id, driver_id, vehicle_description, planned_start_at,
                planned_end_at, status, notes, owner_user_id
            )
            VALUES ($1, $2, $3, $4, $5, 'planned', $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_trip.driver_id)
        .bind(&new_trip.vehicle_description)
        .bind(new_trip.planned_start_at)
        .bind(new_trip.planned_end_at)
        .bind(&new_trip.notes)
        .bind(new_trip.owner_user_id)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::StoreWrite(format!("Error creando viaje: {}", e)))?;

        Ok(trip)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error buscando viaje: {}", e)))?;

        Ok(trip)
    }

    /// Aplicar una transición ya validada. El WHERE sobre el estado origen
    /// protege contra transiciones concurrentes sobre la misma fila.
    pub async fn update_status(
        &self,
        id: Uuid,
        from: TripStatus,
        to: TripStatus,
        ended_at: Option<DateTime<Utc>>,
    ) -> Result<Trip, AppError> {
        let updated = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
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
        .map_err(|e| AppError::StoreWrite(format!("Error actualizando estado del viaje: {}", e)))?;

        updated.ok_or_else(|| {
            AppError::Conflict("el viaje cambió de estado de forma concurrente".to_string())
        })
    }

    /// Listado con conductor, empresa del conductor y total de repartos por
    /// viaje. El COUNT sobre el LEFT JOIN devuelve cero para viajes sin
    /// repartos.
    pub async fn list_with_stats(&self) -> Result<Vec<TripListRow>, AppError> {
        let rows = sqlx::query_as::<_, TripListRow>(
            r#"
            SELECT
                t.id,
                t.display_code,
                d.full_name AS driver_name,
                c.name AS driver_company_name,
                t.vehicle_description,
                t.planned_start_at,
                t.planned_end_at,
                t.status,
                COUNT(dv.id) AS delivery_count
            FROM trips t
            LEFT JOIN drivers d ON d.id = t.driver_id
            LEFT JOIN companies c ON c.id = d.company_id
            LEFT JOIN deliveries dv ON dv.trip_id = t.id
            GROUP BY t.id, d.full_name, c.name
            ORDER BY t.planned_start_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listando viajes: {}", e)))?;

        Ok(rows)
    }

    pub async fn find_detail(&self, id: Uuid) -> Result<Option<TripDetailRow>, AppError> {
        let row = sqlx::query_as::<_, TripDetailRow>(
            r#"
            SELECT t.*, d.full_name AS driver_name, c.name AS driver_company_name
            FROM trips t
            LEFT JOIN drivers d ON d.id = t.driver_id
            LEFT JOIN companies c ON c.id = d.company_id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error buscando detalle del viaje: {}", e)))?;

        Ok(row)
    }
}
