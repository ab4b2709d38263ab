use actix_web::{post, web, HttpResponse, Responder};

use crate::forms::amounts::AmountRequestForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::amounts;

#[post("/payment-amounts")]
pub async fn compute_payment_amounts(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AmountRequestForm>,
) -> impl Responder {
    match amounts::compute_payment_amounts(repo.as_ref(), &user, form.into_inner()) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => error_response(e),
    }
}
