//! Business services sitting between routes and the repository traits.

use thiserror::Error;

use crate::models::auth::{check_role, AuthenticatedUser};
use crate::repository::errors::RepositoryError;
use crate::reports::ReportError;

pub mod amounts;
pub mod approvals;
pub mod audit;
pub mod campaigns;
pub mod export;
pub mod geo;
pub mod imports;
pub mod prestataires;
pub mod stats;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Accès non autorisé")]
    Unauthorized,

    #[error("Enregistrement introuvable")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Erreur lors de l'export: {0}")]
    Export(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Fails with [`ServiceError::Unauthorized`] unless the user carries `role`.
pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if check_role(role, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Fails unless the user carries at least one of `roles`.
pub fn ensure_any_role(user: &AuthenticatedUser, roles: &[&str]) -> ServiceResult<()> {
    if roles.iter().any(|role| check_role(role, &user.roles)) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}
