//! Domain entities shared by the repository, services and routes.

pub mod audit;
pub mod campaign;
pub mod geo;
pub mod prestataire;
pub mod rates;
pub mod status;
