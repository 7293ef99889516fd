//! Modelo de Company
//!
//! Este módulo contiene el struct Company y sus enums asociados.
//! Las empresas participan del motor de asignación solo como filtro de
//! clientes; su alta/baja/modificación vive fuera de este servicio.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Rubro de la empresa - mapea al ENUM company_industry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "company_industry", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CompanyIndustry {
    Delivery,
    MealService,
    Courier,
    Flex,
}

/// Estado de la empresa - mapea al ENUM company_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "company_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CompanyStatus {
    Active,
    Inactive,
    Pending,
}

/// Company principal - mapea exactamente a la tabla companies
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: Uuid,
    pub display_code: i32,
    pub name: String,
    pub industry: Option<CompanyIndustry>,
    pub contact_email: Option<String>,
    pub status: Option<CompanyStatus>,
    pub address: Option<String>,
    pub owner_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
