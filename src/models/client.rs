//! Modelo de Client
//!
//! Un cliente puede estar asociado a una empresa y tener una dirección de
//! entrega. Sin dirección queda fuera de la asignación en lote.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del cliente - mapea al ENUM client_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "client_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Active,
    Inactive,
    Prospective,
}

/// Client principal - mapea exactamente a la tabla clients
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub display_code: i32,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub company_id: Option<Uuid>,
    pub status: Option<ClientStatus>,
    pub owner_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Un cliente sin dirección de entrega no puede recibir repartos.
    pub fn has_address(&self) -> bool {
        self.address
            .as_deref()
            .map_or(false, |a| !a.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_address(address: Option<&str>) -> Client {
        Client {
            id: Uuid::new_v4(),
            display_code: 1,
            full_name: "Cliente de Prueba".to_string(),
            email: None,
            phone: None,
            address: address.map(|a| a.to_string()),
            company_id: None,
            status: Some(ClientStatus::Active),
            owner_user_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_has_address() {
        assert!(client_with_address(Some("Calle 1")).has_address());
        assert!(!client_with_address(Some("   ")).has_address());
        assert!(!client_with_address(Some("")).has_address());
        assert!(!client_with_address(None).has_address());
    }
}
