//! Postgres repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` (or a transaction connection) as the first argument.

pub mod audit_repo;
pub mod bill_repo;
pub mod citizen_repo;
pub mod complaint_repo;
pub mod dashboard_repo;
pub mod kiosk_repo;
pub mod officer_repo;

pub use audit_repo::AuditLogRepo;
pub use bill_repo::BillRepo;
pub use citizen_repo::CitizenRepo;
pub use complaint_repo::ComplaintRepo;
pub use dashboard_repo::DashboardRepo;
pub use kiosk_repo::KioskRepo;
pub use officer_repo::OfficerRepo;
