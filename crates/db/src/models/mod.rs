//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Input / change DTOs consumed by both the Postgres and in-memory stores

pub mod audit;
pub mod bill;
pub mod citizen;
pub mod complaint;
pub mod dashboard;
pub mod kiosk;
pub mod officer;
