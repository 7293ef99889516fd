//! Modelo de Delivery
//!
//! Un reparto es una línea con destino propio, asociada (u opcionalmente no)
//! a un viaje. Conductor y vehículo se copian del viaje al crearlo para poder
//! consultarlo de forma independiente. La dirección de destino se copia de la
//! dirección del cliente en el momento de la creación y no se vuelve a
//! resolver después.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Estado del reparto - mapea al ENUM delivery_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "delivery_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::InProgress => "in_progress",
            DeliveryStatus::Completed => "completed",
            DeliveryStatus::Cancelled => "cancelled",
        }
    }

    /// Completado y cancelado no admiten más transiciones.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeliveryStatus::Completed | DeliveryStatus::Cancelled)
    }

    /// Tabla de transiciones legales del reparto, espejo de la del viaje.
    ///
    /// pending -> in_progress | cancelled
    /// in_progress -> completed | cancelled
    pub fn validate_transition(self, target: DeliveryStatus) -> Result<(), AppError> {
        use DeliveryStatus::*;

        if self.is_terminal() {
            return Err(AppError::AlreadyTerminal(format!(
                "el reparto en estado '{}' no admite más transiciones",
                self.as_str()
            )));
        }

        match (self, target) {
            (Pending, InProgress)
            | (Pending, Cancelled)
            | (InProgress, Completed)
            | (InProgress, Cancelled) => Ok(()),
            (from, to) => Err(AppError::IllegalTransition(format!(
                "transición de reparto no permitida: '{}' -> '{}'",
                from.as_str(),
                to.as_str()
            ))),
        }
    }
}

/// Delivery principal - mapea exactamente a la tabla deliveries
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Delivery {
    pub id: Uuid,
    pub display_code: i32,
    pub trip_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub vehicle_description: String,
    pub destination: String,
    pub start_at: DateTime<Utc>,
    pub estimated_end_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub status: DeliveryStatus,
    pub notes: Option<String>,
    pub owner_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos para insertar un reparto nuevo. El display_code lo asigna el store.
#[derive(Debug, Clone)]
pub struct NewDelivery {
    pub trip_id: Option<Uuid>,
    pub driver_id: Uuid,
    pub vehicle_description: String,
    pub destination: String,
    pub start_at: DateTime<Utc>,
    pub estimated_end_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub owner_user_id: Uuid,
}

impl NewDelivery {
    /// Construir la fila validando el invariante innegociable: todo reparto
    /// nace con un destino no vacío. El orquestador pre-filtra los clientes
    /// sin dirección, pero esta guarda aplica igual en todos los caminos.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trip_id: Option<Uuid>,
        driver_id: Uuid,
        vehicle_description: String,
        destination: String,
        start_at: DateTime<Utc>,
        estimated_end_at: Option<DateTime<Utc>>,
        notes: Option<String>,
        owner_user_id: Uuid,
    ) -> Result<Self, AppError> {
        if destination.trim().is_empty() {
            return Err(AppError::MissingDestination(
                "el reparto no tiene dirección de destino".to_string(),
            ));
        }

        Ok(Self {
            trip_id,
            driver_id,
            vehicle_description,
            destination,
            start_at,
            estimated_end_at,
            notes,
            owner_user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        use DeliveryStatus::*;
        assert!(Pending.validate_transition(InProgress).is_ok());
        assert!(Pending.validate_transition(Cancelled).is_ok());
        assert!(InProgress.validate_transition(Completed).is_ok());
        assert!(InProgress.validate_transition(Cancelled).is_ok());
    }

    #[test]
    fn test_illegal_transitions_from_open_states() {
        use DeliveryStatus::*;
        assert!(matches!(
            Pending.validate_transition(Completed),
            Err(AppError::IllegalTransition(_))
        ));
        assert!(matches!(
            InProgress.validate_transition(Pending),
            Err(AppError::IllegalTransition(_))
        ));
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        use DeliveryStatus::*;
        for terminal in [Completed, Cancelled] {
            for target in [Pending, InProgress, Completed, Cancelled] {
                assert!(matches!(
                    terminal.validate_transition(target),
                    Err(AppError::AlreadyTerminal(_))
                ));
            }
        }
    }

    #[test]
    fn test_new_delivery_requires_destination() {
        let owner = Uuid::new_v4();
        let driver = Uuid::new_v4();
        let now = chrono::Utc::now();

        let err = NewDelivery::new(
            None,
            driver,
            "Ford Transit AB123CD".to_string(),
            "   ".to_string(),
            now,
            None,
            None,
            owner,
        );
        assert!(matches!(err, Err(AppError::MissingDestination(_))));

        let ok = NewDelivery::new(
            None,
            driver,
            "Ford Transit AB123CD".to_string(),
            "Calle 1 123".to_string(),
            now,
            None,
            None,
            owner,
        );
        assert!(ok.is_ok());
    }
}
