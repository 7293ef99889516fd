use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::directory_dto::{ClientOption, CompanyOption, DriverOption};
use crate::services::directory_service::DirectoryService;
use crate::utils::errors::AppError;

pub struct DirectoryController {
    directory: DirectoryService,
}

impl DirectoryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            directory: DirectoryService::new(pool),
        }
    }

    pub async fn list_companies(&self) -> Result<Vec<CompanyOption>, AppError> {
        let companies = self.directory.companies().await?;
        Ok(companies.into_iter().map(CompanyOption::from).collect())
    }

    pub async fn list_clients(&self, company_id: Uuid) -> Result<Vec<ClientOption>, AppError> {
        let clients = self.directory.clients_by_company(company_id).await?;
        Ok(clients.into_iter().map(ClientOption::from).collect())
    }

    pub async fn list_active_drivers(&self) -> Result<Vec<DriverOption>, AppError> {
        let drivers = self.directory.active_drivers().await?;
        Ok(drivers.into_iter().map(DriverOption::from).collect())
    }
}
