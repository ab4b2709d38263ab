//! HTTP route handlers. Thin: extract, call the service, map the error.

use actix_web::HttpResponse;
use serde::Deserialize;
use serde_json::json;

use crate::domain::status::WorkflowStatus;
use crate::repository::errors::RepositoryError;
use crate::repository::PrestataireListQuery;
use crate::services::ServiceError;

pub mod amounts;
pub mod approvals;
pub mod audit;
pub mod campaigns;
pub mod geo;
pub mod imports;
pub mod prestataires;
pub mod stats;

/// Maps a service failure onto the HTTP response every handler returns.
pub fn error_response(err: ServiceError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        ServiceError::Unauthorized => HttpResponse::Forbidden().json(body),
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::Validation(_) | ServiceError::Report(_) => {
            HttpResponse::UnprocessableEntity().json(body)
        }
        ServiceError::Repository(RepositoryError::NotFound) => HttpResponse::NotFound()
            .json(json!({ "error": "Enregistrement introuvable" })),
        ServiceError::Repository(e) => {
            log::error!("Repository failure: {e}");
            HttpResponse::InternalServerError().json(json!({ "error": "Erreur interne" }))
        }
        ServiceError::Export(e) => {
            log::error!("Export failure: {e}");
            HttpResponse::InternalServerError().json(json!({ "error": "Erreur interne" }))
        }
    }
}

/// Query parameters shared by the list, stats and export endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub campaign_id: Option<i32>,
    pub form_id: Option<i32>,
    pub province_id: Option<i32>,
    pub zone_id: Option<i32>,
    pub aire_id: Option<i32>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
}

impl ListParams {
    pub fn to_query(&self) -> PrestataireListQuery {
        PrestataireListQuery {
            campaign_id: self.campaign_id,
            form_id: self.form_id,
            province_id: self.province_id,
            zone_id: self.zone_id,
            aire_id: self.aire_id,
            category: self.category.clone(),
            status: self.status.as_deref().and_then(WorkflowStatus::parse),
            search: self.search.clone(),
            pagination: None,
        }
    }

    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }
}
