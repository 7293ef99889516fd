use sqlx::PgPool;
use uuid::Uuid;

use crate::models::company::Company;
use crate::utils::errors::AppError;

pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let result = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Lookup(format!("Error buscando empresa: {}", e)))?;

        Ok(result)
    }

    pub async fn list_ordered_by_name(&self) -> Result<Vec<Company>, AppError> {
        let result = sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Lookup(format!("Error listando empresas: {}", e)))?;

        Ok(result)
    }
}
