use actix_web::{get, post, web, HttpResponse, Responder};

use crate::forms::campaigns::{CampaignForm, FormForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::campaigns;

#[get("/campaigns")]
pub async fn list_campaigns(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match campaigns::list_campaigns(repo.as_ref(), &user) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(e),
    }
}

#[get("/campaigns/{id}/forms")]
pub async fn list_forms(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    id: web::Path<i32>,
) -> impl Responder {
    match campaigns::list_forms(repo.as_ref(), &user, id.into_inner()) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(e),
    }
}

#[post("/campaigns")]
pub async fn create_campaign(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CampaignForm>,
) -> impl Responder {
    match campaigns::create_campaign(repo.as_ref(), &user, form.into_inner()) {
        Ok(campaign) => HttpResponse::Created().json(campaign),
        Err(e) => error_response(e),
    }
}

#[post("/campaigns/{id}/activate")]
pub async fn activate_campaign(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    id: web::Path<i32>,
) -> impl Responder {
    match campaigns::activate_campaign(repo.as_ref(), &user, id.into_inner()) {
        Ok(campaign) => HttpResponse::Ok().json(campaign),
        Err(e) => error_response(e),
    }
}

#[post("/forms")]
pub async fn create_form(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<FormForm>,
) -> impl Responder {
    match campaigns::create_form(repo.as_ref(), &user, form.into_inner()) {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => error_response(e),
    }
}
