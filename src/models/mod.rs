//! Database and infrastructure models shared across the repository.

pub mod audit;
pub mod auth;
pub mod campaign;
pub mod config;
pub mod geo;
pub mod prestataire;
