//! Modelo de Trip
//!
//! El viaje es la raíz del agregado de asignación: un conductor y un
//! vehículo sobre una ventana planificada, con cero o más repartos
//! asociados. Su máquina de estados vive acá como tabla cerrada.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Estado del viaje - mapea al ENUM trip_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "trip_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Planned => "planned",
            TripStatus::InProgress => "in_progress",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }

    /// Completado y cancelado no admiten más transiciones.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TripStatus::Completed | TripStatus::Cancelled)
    }

    /// Tabla de transiciones legales del viaje.
    ///
    /// planned -> in_progress | cancelled
    /// in_progress -> completed | cancelled
    pub fn validate_transition(self, target: TripStatus) -> Result<(), AppError> {
        use TripStatus::*;

        if self.is_terminal() {
            return Err(AppError::AlreadyTerminal(format!(
                "el viaje en estado '{}' no admite más transiciones",
                self.as_str()
            )));
        }

        match (self, target) {
            (Planned, InProgress)
            | (Planned, Cancelled)
            | (InProgress, Completed)
            | (InProgress, Cancelled) => Ok(()),
            (from, to) => Err(AppError::IllegalTransition(format!(
                "transición de viaje no permitida: '{}' -> '{}'",
                from.as_str(),
                to.as_str()
            ))),
        }
    }
}

/// Trip principal - mapea exactamente a la tabla trips
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: Uuid,
    pub display_code: i32,
    pub driver_id: Option<Uuid>,
    pub vehicle_description: String,
    pub planned_start_at: DateTime<Utc>,
    pub planned_end_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub status: TripStatus,
    pub notes: Option<String>,
    pub owner_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos para insertar un viaje nuevo. El display_code lo asigna el store.
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub driver_id: Uuid,
    pub vehicle_description: String,
    pub planned_start_at: DateTime<Utc>,
    pub planned_end_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub owner_user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        use TripStatus::*;
        assert!(Planned.validate_transition(InProgress).is_ok());
        assert!(Planned.validate_transition(Cancelled).is_ok());
        assert!(InProgress.validate_transition(Completed).is_ok());
        assert!(InProgress.validate_transition(Cancelled).is_ok());
    }

    #[test]
    fn test_illegal_transitions_from_open_states() {
        use TripStatus::*;
        assert!(matches!(
            Planned.validate_transition(Completed),
            Err(AppError::IllegalTransition(_))
        ));
        assert!(matches!(
            Planned.validate_transition(Planned),
            Err(AppError::IllegalTransition(_))
        ));
        assert!(matches!(
            InProgress.validate_transition(Planned),
            Err(AppError::IllegalTransition(_))
        ));
        assert!(matches!(
            InProgress.validate_transition(InProgress),
            Err(AppError::IllegalTransition(_))
        ));
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        use TripStatus::*;
        for terminal in [Completed, Cancelled] {
            for target in [Planned, InProgress, Completed, Cancelled] {
                assert!(
                    matches!(
                        terminal.validate_transition(target),
                        Err(AppError::AlreadyTerminal(_))
                    ),
                    "{} -> {} debería fallar como terminal",
                    terminal.as_str(),
                    target.as_str()
                );
            }
        }
    }
}
