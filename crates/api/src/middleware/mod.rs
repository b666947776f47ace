//! Request extractors and middleware.
//!
//! - [`auth::AuthUser`] -- the caller identified by a JWT Bearer token.
//! - [`rbac::RequireStaff`] -- requires the `admin` or `officer` role.
//! - [`rbac::RequireCitizen`] -- requires the `citizen` role.
//! - [`rbac::RequireAuth`] -- requires any valid token.
//! - [`rate_limit`] -- fixed-window request ceiling per client address.
//! - [`error_detail`] -- adds the cause of a 500 outside production.

pub mod auth;
pub mod error_detail;
pub mod rate_limit;
pub mod rbac;
