mod common;

use actix_web::test;
use backend::config::db::DbProfile;
use backend::infra::state::build_state;
use backend::test_support::create_test_app;
use serde_json::Value;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn health_endpoint_reports_ok_and_migration_version() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state().with_db(DbProfile::Test).build().await?;
    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    let json: Value = serde_json::from_slice(&body)?;

    assert_eq!(json["status"], "ok");
    assert!(json["db"].is_string());
    assert!(json["time"].is_string());
    let db_status = json["db"].as_str().unwrap();
    assert!(db_status == "ok" || db_status == "error");

    Ok(())
}
