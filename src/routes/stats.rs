use actix_web::{get, web, HttpResponse, Responder};

use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{error_response, ListParams};
use crate::services::stats;

#[get("/stats/summary")]
pub async fn stats_summary(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<ListParams>,
) -> impl Responder {
    match stats::stats_summary(repo.as_ref(), &user, params.to_query()) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => error_response(e),
    }
}
