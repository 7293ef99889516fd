//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod client;
pub mod company;
pub mod delivery;
pub mod driver;
pub mod trip;
