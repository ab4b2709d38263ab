use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;

use crate::models::auth::AuthenticatedUser;
use crate::repository::{AuditLogListQuery, DieselRepository};
use crate::routes::error_response;
use crate::services::audit;

#[derive(Debug, Deserialize)]
pub struct AuditParams {
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub action: Option<String>,
    pub page: Option<usize>,
}

#[get("/audit-logs")]
pub async fn list_audit_logs(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<AuditParams>,
) -> impl Responder {
    let mut query = AuditLogListQuery::new();
    query.entity_type = params.entity_type.clone();
    query.entity_id = params.entity_id.clone();
    query.action = params.action.as_deref().map(Into::into);

    match audit::list_audit_logs(
        repo.as_ref(),
        &user,
        query,
        params.page.unwrap_or(1).max(1),
    ) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => error_response(e),
    }
}
