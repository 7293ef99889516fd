use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::{Driver, DriverStatus};
use crate::utils::errors::AppError;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Solo los conductores activos se ofrecen como candidatos de asignación.
    pub async fn list_active(&self) -> Result<Vec<Driver>, AppError> {
        let result = sqlx::query_as::<_, Driver>(
            "SELECT * FROM drivers WHERE status = $1 ORDER BY full_name",
        )
        .bind(DriverStatus::Active)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Lookup(format!("Error listando conductores activos: {}", e)))?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let result = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Lookup(format!("Error buscando conductor: {}", e)))?;

        Ok(result)
    }
}
