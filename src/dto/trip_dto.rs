//! DTOs de viajes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::delivery::DeliveryStatus;
use crate::models::trip::{Trip, TripStatus};

/// Request para transicionar el estado de un viaje
#[derive(Debug, Deserialize)]
pub struct TripTransitionRequest {
    pub target_status: TripStatus,
}

/// Fila del listado de viajes con conductor, empresa y total de repartos
#[derive(Debug, Serialize)]
pub struct TripListItem {
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

/// Reparto asociado dentro del detalle de un viaje
#[derive(Debug, Serialize)]
pub struct TripDeliveryItem {
    pub id: Uuid,
    pub display_code: i32,
    pub destination: String,
    pub driver_name: Option<String>,
    pub status: DeliveryStatus,
    pub start_at: DateTime<Utc>,
    pub estimated_end_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Detalle completo de un viaje con sus repartos ordenados por código
#[derive(Debug, Serialize)]
pub struct TripDetailResponse {
    #[serde(flatten)]
    pub trip: Trip,
    pub driver_name: Option<String>,
    pub driver_company_name: Option<String>,
    pub deliveries: Vec<TripDeliveryItem>,
}
