use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::domain::geo::GeoHierarchy;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::geo;

#[derive(Debug, Deserialize)]
pub struct ZoneParams {
    pub province_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct AireParams {
    pub zone_id: Option<i32>,
}

#[get("/geographic/provinces")]
pub async fn list_provinces(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match geo::list_provinces(repo.as_ref(), &user) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(e),
    }
}

#[get("/geographic/zones")]
pub async fn list_zones(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<ZoneParams>,
) -> impl Responder {
    match geo::list_zones(repo.as_ref(), &user, params.province_id) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(e),
    }
}

#[get("/geographic/aires")]
pub async fn list_aires(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<AireParams>,
) -> impl Responder {
    match geo::list_aires(repo.as_ref(), &user, params.zone_id) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(e),
    }
}

#[post("/geographic/sync")]
pub async fn sync_hierarchy(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    hierarchy: web::Json<GeoHierarchy>,
) -> impl Responder {
    match geo::sync_hierarchy(repo.as_ref(), &user, &hierarchy) {
        Ok(created) => HttpResponse::Ok().json(json!({ "created": created })),
        Err(e) => error_response(e),
    }
}
