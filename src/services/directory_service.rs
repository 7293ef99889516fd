//! Directorio de consulta
//!
//! Lecturas puras sobre empresas, clientes y conductores que alimentan el
//! armado de un lote. Cualquier falla de lectura se reporta como Lookup:
//! nunca se devuelve un resultado vacío ante un error del store.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::client::Client;
use crate::models::company::Company;
use crate::models::driver::Driver;
use crate::repositories::client_repository::ClientRepository;
use crate::repositories::company_repository::CompanyRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::utils::errors::AppError;

pub struct DirectoryService {
    companies: CompanyRepository,
    clients: ClientRepository,
    drivers: DriverRepository,
}

impl DirectoryService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            companies: CompanyRepository::new(pool.clone()),
            clients: ClientRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool),
        }
    }

    pub async fn companies(&self) -> Result<Vec<Company>, AppError> {
        self.companies.list_ordered_by_name().await
    }

    pub async fn company(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        self.companies.find_by_id(id).await
    }

    /// Clientes de la empresa, ordenados por nombre, con su dirección. Este
    /// es el snapshot que usa el orquestador: dentro de una misma operación
    /// no se vuelve a consultar por cliente.
    pub async fn clients_by_company(&self, company_id: Uuid) -> Result<Vec<Client>, AppError> {
        self.clients.list_by_company(company_id).await
    }

    /// Solo conductores con estado activo.
    pub async fn active_drivers(&self) -> Result<Vec<Driver>, AppError> {
        self.drivers.list_active().await
    }

    pub async fn driver(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        self.drivers.find_by_id(id).await
    }
}
