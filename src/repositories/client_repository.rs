use sqlx::PgPool;
use uuid::Uuid;

use crate::models::client::Client;
use crate::utils::errors::AppError;

pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clientes de una empresa ordenados por nombre, con su dirección.
    pub async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<Client>, AppError> {
        let result = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE company_id = $1 ORDER BY full_name",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Lookup(format!("Error listando clientes de la empresa: {}", e)))?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let result = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Lookup(format!("Error buscando cliente: {}", e)))?;

        Ok(result)
    }
}
