//! Well-known role name constants carried in access-token claims.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_OFFICER: &str = "officer";
pub const ROLE_CITIZEN: &str = "citizen";

/// Whether the role belongs to municipal staff (admin portal users).
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_OFFICER
}
