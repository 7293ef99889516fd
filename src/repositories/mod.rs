//! Repositorios de acceso a datos
//!
//! Un repositorio por agregado, sobre sqlx/PostgreSQL. Toda mutación del
//! motor pasa por acá; nunca se actualizan campos sueltos desde afuera.

pub mod client_repository;
pub mod company_repository;
pub mod delivery_repository;
pub mod driver_repository;
pub mod trip_repository;
