use actix_multipart::form::MultipartForm;
use actix_web::{post, web, HttpResponse, Responder};

use crate::forms::imports::UploadReportForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::imports;

#[post("/import/payment-report")]
pub async fn import_payment_report(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadReportForm>,
) -> impl Responder {
    let (filename, bytes) = match form.read() {
        Ok(content) => content,
        Err(e) => {
            log::error!("Failed to read uploaded report: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };
    match imports::import_payment_report(repo.as_ref(), &user, filename.as_deref(), &bytes) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => error_response(e),
    }
}

#[post("/import/kyc-report")]
pub async fn import_kyc_report(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadReportForm>,
) -> impl Responder {
    let (filename, bytes) = match form.read() {
        Ok(content) => content,
        Err(e) => {
            log::error!("Failed to read uploaded report: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };
    match imports::import_kyc_report(repo.as_ref(), &user, filename.as_deref(), &bytes) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => error_response(e),
    }
}
