pub mod admin;
pub mod auth;
pub mod bills;
pub mod complaints;
pub mod dashboard;
pub mod kiosks;
