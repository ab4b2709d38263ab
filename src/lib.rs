use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};

use crate::db::establish_connection_pool;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::amounts::compute_payment_amounts;
use crate::routes::approvals::{approve_batch, reject_batch, validate_prestataire};
use crate::routes::audit::list_audit_logs;
use crate::routes::campaigns::{
    activate_campaign, create_campaign, create_form, list_campaigns, list_forms,
};
use crate::routes::geo::{list_aires, list_provinces, list_zones, sync_hierarchy};
use crate::routes::imports::{import_kyc_report, import_payment_report};
use crate::routes::prestataires::{
    export_prestataires, get_prestataire, list_prestataires, register_prestataire,
    update_prestataire,
};
use crate::routes::stats::stats_summary;

pub mod db;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod reports;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
#[cfg(test)]
pub mod test_support;

pub const SERVICE_IT_ROLE: &str = "it";
pub const SERVICE_MCZ_ROLE: &str = "mcz";
pub const SERVICE_PARTNER_ROLE: &str = "partner";
pub const SERVICE_DPS_ROLE: &str = "dps";
pub const SERVICE_ADMIN_ROLE: &str = "admin";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/partner")
                            // `/prestataires/export` must come before `/prestataires/{id}`.
                            .service(export_prestataires)
                            .service(list_prestataires)
                            .service(get_prestataire)
                            .service(register_prestataire)
                            .service(update_prestataire)
                            .service(import_payment_report)
                            .service(import_kyc_report)
                            .service(compute_payment_amounts),
                    )
                    .service(validate_prestataire)
                    .service(approve_batch)
                    .service(reject_batch)
                    .service(list_campaigns)
                    .service(list_forms)
                    .service(create_campaign)
                    .service(activate_campaign)
                    .service(create_form)
                    .service(list_provinces)
                    .service(list_zones)
                    .service(list_aires)
                    .service(sync_hierarchy)
                    .service(stats_summary)
                    .service(list_audit_logs),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
