use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use chrono::Utc;
use serde_json::json;

use prestapay::models::auth::AuthenticatedUser;
use prestapay::models::config::ServerConfig;
use prestapay::repository::DieselRepository;
use prestapay::routes::approvals::{approve_batch, validate_prestataire};
use prestapay::routes::prestataires::{
    export_prestataires, get_prestataire, list_prestataires, register_prestataire,
};
use prestapay::routes::stats::stats_summary;

mod common;

const SECRET: &str = "test-secret";

fn server_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".into(),
        port: 0,
        database_url: "unused".into(),
        secret: SECRET.into(),
        auth_service_url: "http://localhost".into(),
    }
}

fn token(role: &str, zone_id: Option<i32>) -> String {
    let user = AuthenticatedUser {
        sub: "1".into(),
        email: format!("{role}@example.com"),
        name: format!("Test {role}"),
        roles: vec![role.to_string()],
        zone_id,
        province_id: None,
        exp: (Utc::now().timestamp() + 3600) as usize,
    };
    user.to_jwt(SECRET).unwrap()
}

macro_rules! test_app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($repo.clone()))
                .app_data(web::Data::new(server_config()))
                .service(export_prestataires)
                .service(list_prestataires)
                .service(get_prestataire)
                .service(register_prestataire)
                .service(validate_prestataire)
                .service(approve_batch)
                .service(stats_summary),
        )
        .await
    };
}

#[actix_web::test]
async fn test_list_requires_bearer_token() {
    let test_db = common::TestDb::new("test_routes_auth.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test_app!(repo);

    let req = test::TestRequest::get().uri("/prestataires").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_register_then_list_and_export() {
    let test_db = common::TestDb::new("test_routes_register.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test_app!(repo);

    let req = test::TestRequest::post()
        .uri("/prestataires")
        .insert_header(("Authorization", format!("Bearer {}", token("it", None))))
        .set_json(json!({
            "first_name": "Marie",
            "last_name": "Kabila",
            "category": "Infirmier Titulaire",
            "presence_days": 22
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["effective_status"], "PENDING");
    assert!(body["prestataire_id"].as_str().unwrap().starts_with("P-"));

    let req = test::TestRequest::get()
        .uri("/prestataires")
        .insert_header(("Authorization", format!("Bearer {}", token("mcz", None))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["first_name"], "Marie");

    let req = test::TestRequest::get()
        .uri("/prestataires/export?format=csv")
        .insert_header(("Authorization", format!("Bearer {}", token("partner", None))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"Prestataire ID,"));
}

#[actix_web::test]
async fn test_validate_then_approve_flow() {
    let test_db = common::TestDb::new("test_routes_workflow.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test_app!(repo);

    let req = test::TestRequest::post()
        .uri("/prestataires")
        .insert_header(("Authorization", format!("Bearer {}", token("it", None))))
        .set_json(json!({
            "prestataire_id": "P001",
            "first_name": "Marie",
            "last_name": "Kabila",
            "category": "Infirmier Titulaire",
            "presence_days": 22
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().unwrap();

    // MCZ cannot approve a prestataire that IT has not validated.
    let req = test::TestRequest::post()
        .uri("/approvals/approve")
        .insert_header(("Authorization", format!("Bearer {}", token("mcz", None))))
        .set_json(json!({ "ids": [id] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let outcome: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(outcome["updated"].as_array().unwrap().len(), 0);
    assert_eq!(outcome["errors"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::post()
        .uri(&format!("/approvals/validate/{id}"))
        .insert_header(("Authorization", format!("Bearer {}", token("it", None))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let validated: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(validated["badge"], "Validé par IT");

    let req = test::TestRequest::post()
        .uri("/approvals/approve")
        .insert_header(("Authorization", format!("Bearer {}", token("mcz", None))))
        .set_json(json!({ "ids": [id] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let outcome: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(outcome["updated"], json!([id]));

    let req = test::TestRequest::get()
        .uri("/stats/summary")
        .insert_header(("Authorization", format!("Bearer {}", token("dps", None))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let summary: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(summary["total"], 1);
    assert_eq!(summary["approved"], 1);
}

#[actix_web::test]
async fn test_register_is_forbidden_for_partner() {
    let test_db = common::TestDb::new("test_routes_forbidden.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test_app!(repo);

    let req = test::TestRequest::post()
        .uri("/prestataires")
        .insert_header(("Authorization", format!("Bearer {}", token("partner", None))))
        .set_json(json!({
            "first_name": "Marie",
            "last_name": "Kabila",
            "category": "Infirmier Titulaire",
            "presence_days": 22
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
