//! Orquestador de asignación en lote
//!
//! Dada una empresa, una selección de sus clientes y un conductor, crea un
//! viaje y un reparto por cada cliente con dirección, en una sola
//! transacción. Los clientes sin dirección se omiten y se reportan por
//! nombre; un lote donde todos quedan omitidos igual crea el viaje (sin
//! repartos) y lo informa como éxito parcial.
//!
//! La creación individual de un reparto es el caso N=1 del mismo flujo y
//! comparte esta implementación.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

use crate::dto::assignment_dto::{BatchAssignmentRequest, SkippedClient};
use crate::dto::delivery_dto::CreateDeliveryRequest;
use crate::models::client::Client;
use crate::models::delivery::{Delivery, NewDelivery};
use crate::models::trip::{NewTrip, Trip};
use crate::services::delivery_service::DeliveryService;
use crate::services::directory_service::DirectoryService;
use crate::services::trip_service::TripService;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_not_empty;

/// Parámetros comunes del lote: conductor, vehículo, ventana y notas se
/// copian a cada reparto creado.
#[derive(Debug, Clone)]
pub struct AssignmentOrder {
    pub driver_id: Uuid,
    pub vehicle_description: String,
    pub start_at: DateTime<Utc>,
    pub estimated_end_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub owner_user_id: Uuid,
}

/// Destino que quedó dentro del lote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryTarget {
    pub client_id: Option<Uuid>,
    pub label: String,
    pub destination: String,
}

/// Resultado de resolver la selección contra el snapshot del directorio
#[derive(Debug, Default)]
pub struct AssignmentPlan {
    pub targets: Vec<DeliveryTarget>,
    pub skipped: Vec<SkippedClient>,
}

/// Resultado final del lote
#[derive(Debug)]
pub struct AssignmentOutcome {
    pub trip: Trip,
    pub deliveries: Vec<Delivery>,
    pub skipped: Vec<SkippedClient>,
}

/// Resolver la selección de clientes contra el snapshot tomado al inicio de
/// la operación. El snapshot no se vuelve a consultar: si una dirección
/// cambió después de la lectura, se usa la leída (last-read-wins). Clientes
/// repetidos cuentan una sola vez; los que no aparecen en el snapshot o no
/// tienen dirección quedan omitidos con su motivo.
pub fn plan_assignment(selected: &[Uuid], snapshot: &[Client]) -> AssignmentPlan {
    let mut plan = AssignmentPlan::default();
    let mut seen: HashSet<Uuid> = HashSet::new();

    for client_id in selected {
        if !seen.insert(*client_id) {
            continue;
        }

        match snapshot.iter().find(|c| c.id == *client_id) {
            Some(client) if client.has_address() => plan.targets.push(DeliveryTarget {
                client_id: Some(client.id),
                label: client.full_name.clone(),
                destination: client.address.clone().unwrap_or_default(),
            }),
            Some(client) => plan.skipped.push(SkippedClient {
                client_id: client.id,
                full_name: client.full_name.clone(),
                reason: "no tiene una dirección asignada".to_string(),
            }),
            None => plan.skipped.push(SkippedClient {
                client_id: *client_id,
                full_name: client_id.to_string(),
                reason: "no pertenece a la empresa seleccionada".to_string(),
            }),
        }
    }

    plan
}

pub struct AssignmentService {
    pool: PgPool,
    directory: DirectoryService,
    trips: TripService,
    deliveries: DeliveryService,
}

impl AssignmentService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            directory: DirectoryService::new(pool.clone()),
            trips: TripService::new(pool.clone()),
            deliveries: DeliveryService::new(pool.clone()),
            pool,
        }
    }

    /// Asignación en lote: precondiciones, snapshot del directorio, plan y
    /// ejecución transaccional. Ante una precondición inválida no se escribe
    /// nada.
    pub async fn assign_batch(
        &self,
        request: BatchAssignmentRequest,
        owner_user_id: Uuid,
    ) -> Result<AssignmentOutcome, AppError> {
        // Precondiciones que no tocan el store
        if request.client_ids.is_empty() {
            return Err(AppError::Validation(
                "debe seleccionar al menos un cliente para el lote".to_string(),
            ));
        }
        validate_not_empty(&request.vehicle_description).map_err(|_| {
            AppError::Validation("la descripción del vehículo es requerida".to_string())
        })?;

        // Precondiciones contra el directorio
        let company = self
            .directory
            .company(request.company_id)
            .await?
            .ok_or_else(|| {
                AppError::Validation("la empresa seleccionada no existe".to_string())
            })?;
        self.directory
            .driver(request.driver_id)
            .await?
            .ok_or_else(|| {
                AppError::Validation("el conductor seleccionado no existe".to_string())
            })?;

        // Snapshot único del directorio para toda la operación
        let snapshot = self.directory.clients_by_company(company.id).await?;
        let plan = plan_assignment(&request.client_ids, &snapshot);

        for skipped in &plan.skipped {
            log::warn!(
                "⚠️ Cliente omitido del lote: {} ({})",
                skipped.full_name,
                skipped.reason
            );
        }
        for target in &plan.targets {
            log::debug!("🧾 Destino del lote: {} -> {}", target.label, target.destination);
        }

        let order = AssignmentOrder {
            driver_id: request.driver_id,
            vehicle_description: request.vehicle_description,
            start_at: request.planned_start_at,
            estimated_end_at: request.planned_end_at,
            notes: request.notes,
            owner_user_id,
        };

        let (trip, deliveries) = self.assign(&order, plan.targets).await?;

        if deliveries.is_empty() {
            log::warn!(
                "📭 Viaje #{:04} creado sin repartos: ningún cliente seleccionado tenía dirección",
                trip.display_code
            );
        } else {
            log::info!(
                "📦 Viaje #{:04} creado con {} reparto(s), {} cliente(s) omitido(s)",
                trip.display_code,
                deliveries.len(),
                plan.skipped.len()
            );
        }

        Ok(AssignmentOutcome {
            trip,
            deliveries,
            skipped: plan.skipped,
        })
    }

    /// Creación individual: el caso N=1 del mismo flujo. Crea el viaje que
    /// respalda al reparto y el reparto, compartiendo `assign`.
    pub async fn create_single(
        &self,
        request: CreateDeliveryRequest,
        owner_user_id: Uuid,
    ) -> Result<(Trip, Delivery), AppError> {
        validate_not_empty(&request.vehicle_description).map_err(|_| {
            AppError::Validation("la descripción del vehículo es requerida".to_string())
        })?;

        self.directory
            .driver(request.driver_id)
            .await?
            .ok_or_else(|| {
                AppError::Validation("el conductor seleccionado no existe".to_string())
            })?;

        let order = AssignmentOrder {
            driver_id: request.driver_id,
            vehicle_description: request.vehicle_description,
            start_at: request.start_at,
            estimated_end_at: request.estimated_end_at,
            notes: request.notes,
            owner_user_id,
        };

        let target = DeliveryTarget {
            client_id: None,
            label: request.destination.clone(),
            destination: request.destination,
        };

        let (trip, deliveries) = self.assign(&order, vec![target]).await?;
        let delivery = deliveries.into_iter().next().ok_or_else(|| {
            AppError::Internal("el lote no devolvió el reparto creado".to_string())
        })?;

        log::info!(
            "📦 Reparto #{:04} registrado y asignado al viaje #{:04}",
            delivery.display_code,
            trip.display_code
        );
        Ok((trip, delivery))
    }

    /// Secuencia compartida: construir las filas (la guarda de destino corre
    /// acá, antes de abrir la transacción), insertar el viaje, colgar los
    /// repartos del viaje nuevo e insertarlos en una sola escritura. Las dos
    /// escrituras dependientes forman una única unidad transaccional.
    async fn assign(
        &self,
        order: &AssignmentOrder,
        targets: Vec<DeliveryTarget>,
    ) -> Result<(Trip, Vec<Delivery>), AppError> {
        let mut rows = targets
            .into_iter()
            .map(|target| {
                NewDelivery::new(
                    None,
                    order.driver_id,
                    order.vehicle_description.clone(),
                    target.destination,
                    order.start_at,
                    order.estimated_end_at,
                    order.notes.clone(),
                    order.owner_user_id,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::StoreWrite(format!("Error abriendo transacción: {}", e)))?;

        let new_trip = NewTrip {
            driver_id: order.driver_id,
            vehicle_description: order.vehicle_description.clone(),
            planned_start_at: order.start_at,
            planned_end_at: order.estimated_end_at,
            notes: order.notes.clone(),
            owner_user_id: order.owner_user_id,
        };
        let trip = self.trips.create(&mut *tx, &new_trip).await?;

        for row in &mut rows {
            row.trip_id = Some(trip.id);
        }
        let deliveries = self.deliveries.create_batch(&mut *tx, &rows).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::StoreWrite(format!("Error confirmando transacción: {}", e)))?;

        Ok((trip, deliveries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::client::ClientStatus;

    fn client(name: &str, address: Option<&str>, company_id: Uuid) -> Client {
        Client {
            id: Uuid::new_v4(),
            display_code: 1,
            full_name: name.to_string(),
            email: None,
            phone: None,
            address: address.map(|a| a.to_string()),
            company_id: Some(company_id),
            status: Some(ClientStatus::Active),
            owner_user_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn order(owner: Uuid, driver: Uuid) -> AssignmentOrder {
        AssignmentOrder {
            driver_id: driver,
            vehicle_description: "Ford Transit AB123CD".to_string(),
            start_at: Utc::now(),
            estimated_end_at: None,
            notes: Some("frágil".to_string()),
            owner_user_id: owner,
        }
    }

    #[test]
    fn test_acme_scenario_skips_client_without_address() {
        // Acme: A con "Calle 1", B sin dirección, C con "Calle 3". El lote
        // de los tres debe producir dos destinos y omitir a B por nombre.
        let company_id = Uuid::new_v4();
        let a = client("Cliente A", Some("Calle 1"), company_id);
        let b = client("Cliente B", None, company_id);
        let c = client("Cliente C", Some("Calle 3"), company_id);
        let snapshot = vec![a.clone(), b.clone(), c.clone()];

        let plan = plan_assignment(&[a.id, b.id, c.id], &snapshot);

        assert_eq!(plan.targets.len(), 2);
        assert_eq!(plan.targets[0].client_id, Some(a.id));
        assert_eq!(plan.targets[0].destination, "Calle 1");
        assert_eq!(plan.targets[1].client_id, Some(c.id));
        assert_eq!(plan.targets[1].destination, "Calle 3");
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].full_name, "Cliente B");
        assert_eq!(plan.skipped[0].client_id, b.id);
    }

    #[test]
    fn test_all_clients_without_address_yields_empty_batch() {
        let company_id = Uuid::new_v4();
        let a = client("Cliente A", None, company_id);
        let b = client("Cliente B", Some("   "), company_id);
        let snapshot = vec![a.clone(), b.clone()];

        let plan = plan_assignment(&[a.id, b.id], &snapshot);

        assert!(plan.targets.is_empty());
        assert_eq!(plan.skipped.len(), 2);
    }

    #[test]
    fn test_unknown_client_is_skipped_not_fatal() {
        let company_id = Uuid::new_v4();
        let a = client("Cliente A", Some("Calle 1"), company_id);
        let stranger = Uuid::new_v4();
        let snapshot = vec![a.clone()];

        let plan = plan_assignment(&[a.id, stranger], &snapshot);

        assert_eq!(plan.targets.len(), 1);
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].client_id, stranger);
    }

    #[test]
    fn test_duplicate_selection_counts_once() {
        let company_id = Uuid::new_v4();
        let a = client("Cliente A", Some("Calle 1"), company_id);
        let snapshot = vec![a.clone()];

        let plan = plan_assignment(&[a.id, a.id, a.id], &snapshot);

        assert_eq!(plan.targets.len(), 1);
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn test_single_and_batch_of_one_build_identical_rows() {
        // El camino individual y el lote de tamaño uno deben producir filas
        // estructuralmente idénticas: misma implementación, no duplicada.
        let company_id = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let driver = Uuid::new_v4();
        let a = client("Cliente A", Some("Calle 1 123"), company_id);
        let snapshot = vec![a.clone()];
        let order = order(owner, driver);

        let plan = plan_assignment(&[a.id], &snapshot);
        assert_eq!(plan.targets.len(), 1);
        let batch_target = &plan.targets[0];

        let single_target = DeliveryTarget {
            client_id: None,
            label: "Calle 1 123".to_string(),
            destination: "Calle 1 123".to_string(),
        };

        let from_batch = NewDelivery::new(
            None,
            order.driver_id,
            order.vehicle_description.clone(),
            batch_target.destination.clone(),
            order.start_at,
            order.estimated_end_at,
            order.notes.clone(),
            order.owner_user_id,
        )
        .unwrap();
        let from_single = NewDelivery::new(
            None,
            order.driver_id,
            order.vehicle_description.clone(),
            single_target.destination.clone(),
            order.start_at,
            order.estimated_end_at,
            order.notes.clone(),
            order.owner_user_id,
        )
        .unwrap();

        assert_eq!(from_batch.driver_id, from_single.driver_id);
        assert_eq!(from_batch.vehicle_description, from_single.vehicle_description);
        assert_eq!(from_batch.destination, from_single.destination);
        assert_eq!(from_batch.start_at, from_single.start_at);
        assert_eq!(from_batch.estimated_end_at, from_single.estimated_end_at);
        assert_eq!(from_batch.notes, from_single.notes);
        assert_eq!(from_batch.owner_user_id, from_single.owner_user_id);
    }

    #[test]
    fn test_plan_uses_snapshot_not_later_edits() {
        // Ventana de staleness conocida: el plan resuelve direcciones contra
        // el snapshot leído al inicio; una edición posterior no lo afecta
        // (last-read-wins).
        let company_id = Uuid::new_v4();
        let a = client("Cliente A", Some("Calle Vieja 1"), company_id);
        let snapshot = vec![a.clone()];

        let mut edited = a.clone();
        edited.address = Some("Calle Nueva 9".to_string());
        let _directory_now = vec![edited];

        let plan = plan_assignment(&[a.id], &snapshot);
        assert_eq!(plan.targets[0].destination, "Calle Vieja 1");
    }
}
