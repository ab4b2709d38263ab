use actix_web::{get, post, put, web, HttpResponse, Responder};

use crate::forms::prestataires::{RegisterPrestataireForm, UpdatePrestataireForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{error_response, ListParams};
use crate::services::export::{self, EXPORT_CSV};
use crate::services::prestataires;

#[get("/prestataires")]
pub async fn list_prestataires(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<ListParams>,
) -> impl Responder {
    match prestataires::list_prestataires(repo.as_ref(), &user, params.to_query(), params.page()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => error_response(e),
    }
}

#[get("/prestataires/{id}")]
pub async fn get_prestataire(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    id: web::Path<i32>,
) -> impl Responder {
    match prestataires::get_prestataire(repo.as_ref(), &user, id.into_inner()) {
        Ok(row) => HttpResponse::Ok().json(row),
        Err(e) => error_response(e),
    }
}

#[post("/prestataires")]
pub async fn register_prestataire(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<RegisterPrestataireForm>,
) -> impl Responder {
    match prestataires::register_prestataire(repo.as_ref(), &user, form.into_inner()) {
        Ok(row) => HttpResponse::Created().json(row),
        Err(e) => error_response(e),
    }
}

#[put("/prestataires/{id}")]
pub async fn update_prestataire(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    id: web::Path<i32>,
    form: web::Json<UpdatePrestataireForm>,
) -> impl Responder {
    match prestataires::update_prestataire(repo.as_ref(), &user, id.into_inner(), form.into_inner())
    {
        Ok(row) => HttpResponse::Ok().json(row),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct ExportParams {
    pub format: Option<String>,
}

#[get("/prestataires/export")]
pub async fn export_prestataires(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    filters: web::Query<ListParams>,
    params: web::Query<ExportParams>,
) -> impl Responder {
    let format = params.format.as_deref().unwrap_or(EXPORT_CSV);
    match export::export_prestataires(repo.as_ref(), &user, filters.to_query(), format) {
        Ok(file) => HttpResponse::Ok()
            .content_type(file.content_type)
            .insert_header((
                actix_web::http::header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ))
            .body(file.bytes),
        Err(e) => error_response(e),
    }
}
