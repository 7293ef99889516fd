//! DTOs del directorio
//!
//! Opciones de selección que alimentan el armado de un lote: empresas,
//! clientes de una empresa y conductores activos.

use serde::Serialize;
use uuid::Uuid;

use crate::models::client::Client;
use crate::models::company::Company;
use crate::models::driver::Driver;

#[derive(Debug, Serialize)]
pub struct CompanyOption {
    pub id: Uuid,
    pub display_code: i32,
    pub name: String,
}

impl From<Company> for CompanyOption {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            display_code: company.display_code,
            name: company.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClientOption {
    pub id: Uuid,
    pub display_code: i32,
    pub full_name: String,
    pub address: Option<String>,
}

impl From<Client> for ClientOption {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            display_code: client.display_code,
            full_name: client.full_name,
            address: client.address,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DriverOption {
    pub id: Uuid,
    pub display_code: i32,
    pub full_name: String,
}

impl From<Driver> for DriverOption {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id,
            display_code: driver.display_code,
            full_name: driver.full_name,
        }
    }
}
