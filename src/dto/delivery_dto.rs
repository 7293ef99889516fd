//! DTOs de repartos

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::delivery::DeliveryStatus;

/// Request para crear un reparto individual. Crea también el viaje que lo
/// respalda, igual que el lote con un solo destino.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDeliveryRequest {
    pub driver_id: Uuid,

    #[validate(length(min = 1, max = 200))]
    pub vehicle_description: String,

    /// Dirección de destino. La guarda de dominio rechaza destinos vacíos.
    pub destination: String,

    pub start_at: DateTime<Utc>,
    pub estimated_end_at: Option<DateTime<Utc>>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Request para transicionar el estado de un reparto
#[derive(Debug, Deserialize)]
pub struct DeliveryTransitionRequest {
    pub target_status: DeliveryStatus,
}

/// Resultado de la creación individual
#[derive(Debug, Serialize)]
pub struct DeliveryCreatedResponse {
    pub trip_id: Uuid,
    pub trip_display_code: i32,
    pub delivery_id: Uuid,
    pub delivery_display_code: i32,
}

/// Fila del listado de repartos, con el nombre del conductor
#[derive(Debug, Serialize)]
pub struct DeliveryListItem {
    pub id: Uuid,
    pub display_code: i32,
    pub trip_id: Option<Uuid>,
    pub destination: String,
    pub driver_name: Option<String>,
    pub vehicle_description: String,
    pub status: DeliveryStatus,
    pub start_at: DateTime<Utc>,
    pub estimated_end_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}
