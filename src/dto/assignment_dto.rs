//! DTOs de asignación en lote
//!
//! Request y response del flujo que crea un viaje y sus repartos a partir
//! de una selección de clientes de una empresa.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request para asignar repartos en lote
#[derive(Debug, Deserialize, Validate)]
pub struct BatchAssignmentRequest {
    pub company_id: Uuid,

    /// Clientes seleccionados de la empresa. Debe haber al menos uno.
    #[validate(length(min = 1))]
    pub client_ids: Vec<Uuid>,

    pub driver_id: Uuid,

    #[validate(length(min = 1, max = 200))]
    pub vehicle_description: String,

    pub planned_start_at: DateTime<Utc>,
    pub planned_end_at: Option<DateTime<Utc>>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Cliente omitido del lote, con el motivo
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkippedClient {
    pub client_id: Uuid,
    pub full_name: String,
    pub reason: String,
}

/// Resultado del lote: un viaje, N repartos creados, M clientes omitidos
#[derive(Debug, Serialize)]
pub struct BatchAssignmentResponse {
    pub trip_id: Uuid,
    pub trip_display_code: i32,
    pub deliveries_created: usize,
    pub skipped: Vec<SkippedClient>,
}
