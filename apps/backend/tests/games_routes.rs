//! Integration tests for the game action/snapshot HTTP routes. Grounded on
//! the teacher's `tests/games_snapshot.rs` — same `SharedTxn`-injection
//! pattern for seeding a row the running request can see uncommitted.

mod common;

use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{test, HttpMessage};
use backend::config::db::DbProfile;
use backend::db::txn::SharedTxn;
use backend::infra::state::build_state;
use backend::services::game_admin;
use backend::test_support::create_test_app;
use serde_json::{json, Value};
use serial_test::serial;

async fn seed_game(shared: &SharedTxn) -> i64 {
    let actors = vec![
        ("p0".to_string(), false),
        ("p1".to_string(), false),
        ("p2".to_string(), false),
        ("p3".to_string(), false),
    ];
    let game = game_admin::create_game(shared.transaction(), actors, 42).await.expect("seed game");
    game.id
}

#[tokio::test]
#[serial]
async fn get_state_returns_200_with_etag() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state().with_db(DbProfile::Test).build().await?;
    let shared = SharedTxn::open(&state.db).await?;
    let game_id = seed_game(&shared).await;

    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::get().uri(&format!("/api/games/{game_id}/state?seat=0")).to_request();
    req.extensions_mut().insert(shared.clone());

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let etag = resp.headers().get(ETAG).expect("etag header present").to_str()?.to_string();
    assert!(etag.starts_with(r#""game-"#));

    let body = test::read_body(resp).await;
    let json: Value = serde_json::from_slice(&body)?;
    assert!(json.get("seats").is_some() || json.get("phase").is_some(), "snapshot should carry game state fields");

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
#[serial]
async fn get_state_returns_304_when_etag_matches() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state().with_db(DbProfile::Test).build().await?;
    let shared = SharedTxn::open(&state.db).await?;
    let game_id = seed_game(&shared).await;

    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::get().uri(&format!("/api/games/{game_id}/state?seat=0")).to_request();
    req.extensions_mut().insert(shared.clone());
    let resp = test::call_service(&app, req).await;
    let etag = resp.headers().get(ETAG).unwrap().to_str()?.to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}/state?seat=0"))
        .insert_header((IF_NONE_MATCH, etag))
        .to_request();
    req.extensions_mut().insert(shared.clone());
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
#[serial]
async fn get_state_invalid_game_id_returns_400() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state().with_db(DbProfile::Test).build().await?;
    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::get().uri("/api/games/not-a-number/state?seat=0").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    let json: Value = serde_json::from_slice(&body)?;
    assert_eq!(json["code"], "INVALID_GAME_ID");

    Ok(())
}

#[tokio::test]
#[serial]
async fn get_state_nonexistent_game_returns_404() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state().with_db(DbProfile::Test).build().await?;
    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::get().uri("/api/games/999999999/state?seat=0").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body = test::read_body(resp).await;
    let json: Value = serde_json::from_slice(&body)?;
    assert_eq!(json["code"], "GAME_NOT_FOUND");

    Ok(())
}

#[tokio::test]
#[serial]
async fn pass_while_leading_with_nothing_to_clear_is_an_idempotent_no_op() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state().with_db(DbProfile::Test).build().await?;
    let shared = SharedTxn::open(&state.db).await?;
    let game_id = seed_game(&shared).await;

    let leader_seat = {
        let game = backend::repos::games::find_by_id(shared.transaction(), game_id).await?.expect("game exists");
        game.state.current_turn
    };

    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/pass"))
        .set_json(json!({ "seat": leader_seat }))
        .to_request();
    req.extensions_mut().insert(shared.clone());
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let json: Value = serde_json::from_slice(&body)?;
    assert_eq!(json["trick_cleared"], false);

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
#[serial]
async fn pass_out_of_turn_returns_422_not_your_turn() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state().with_db(DbProfile::Test).build().await?;
    let shared = SharedTxn::open(&state.db).await?;
    let game_id = seed_game(&shared).await;

    let leader_seat = {
        let game = backend::repos::games::find_by_id(shared.transaction(), game_id).await?.expect("game exists");
        game.state.current_turn
    };
    let wrong_seat = (leader_seat + 1) % 4;

    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/pass"))
        .set_json(json!({ "seat": wrong_seat }))
        .to_request();
    req.extensions_mut().insert(shared.clone());
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = test::read_body(resp).await;
    let json: Value = serde_json::from_slice(&body)?;
    assert_eq!(json["code"], "NOT_YOUR_TURN");

    shared.rollback().await?;
    Ok(())
}
