//! Domain rules for the SUVIDHA citizen-services backend.
//!
//! Pure logic only: no I/O, no database access. Shared by `suvidha-db` and
//! `suvidha-api`.

pub mod billing;
pub mod complaint;
pub mod error;
pub mod otp;
pub mod roles;
pub mod types;
pub mod utility_status;
pub mod validation;
