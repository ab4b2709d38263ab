use actix_web::{post, web, HttpResponse, Responder};

use crate::forms::approvals::{ApproveBatchForm, RejectBatchForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::approvals;

#[post("/approvals/validate/{id}")]
pub async fn validate_prestataire(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    id: web::Path<i32>,
) -> impl Responder {
    match approvals::validate_prestataire(repo.as_ref(), &user, id.into_inner()) {
        Ok(row) => HttpResponse::Ok().json(row),
        Err(e) => error_response(e),
    }
}

#[post("/approvals/approve")]
pub async fn approve_batch(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<ApproveBatchForm>,
) -> impl Responder {
    match approvals::approve_batch(repo.as_ref(), &user, form.into_inner()) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => error_response(e),
    }
}

#[post("/approvals/reject")]
pub async fn reject_batch(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<RejectBatchForm>,
) -> impl Responder {
    match approvals::reject_batch(repo.as_ref(), &user, form.into_inner()) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => error_response(e),
    }
}
