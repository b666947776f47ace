//! Authentication primitives.
//!
//! - [`password`] -- Argon2id hashing for the staff account.
//! - [`jwt`] -- HS256 access-token generation and validation.

pub mod jwt;
pub mod password;
