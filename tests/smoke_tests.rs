//! Smoke tests for the core HTTP flows: auth, parking lots, users, vehicles.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use parkarr::config::Config;
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app() -> (Arc<parkarr::api::AppState>, Router) {
    let db_path =
        std::env::temp_dir().join(format!("parkarr-smoke-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.database.url = format!("sqlite:{}", db_path.display());
    config.auth.access_secret = "smoke-access-secret".to_string();
    config.auth.refresh_secret = "smoke-refresh-secret".to_string();
    // Keep hashing cheap so the bootstrap admin login stays fast.
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = parkarr::api::create_app_state_from_config(config)
        .await
        .expect("failed to create app state");

    let router = parkarr::api::router(state.clone()).await;
    (state, router)
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &Router, username: &str, password: &str) -> (String, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "username": username,
                        "password": password
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    (
        body["data"]["access_token"].as_str().unwrap().to_string(),
        body["data"]["refresh_token"].as_str().unwrap().to_string(),
    )
}

fn authed(method: &str, uri: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"));
    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn smoke_login_and_parking_lot_lifecycle() {
    let (_, app) = spawn_app().await;

    // Wrong password is rejected before anything else works.
    let bad_login = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "username": "admin",
                        "password": "invalid-password"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(bad_login.status(), StatusCode::UNAUTHORIZED);

    // Protected routes without a token are rejected too.
    let anonymous = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/parking_lots")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let (access, _) = login(&app, "admin", "password").await;

    let create = app
        .clone()
        .oneshot(authed(
            "POST",
            "/parking_lots",
            &access,
            Some(serde_json::json!({
                "name": "Downtown",
                "longitude": 9.19,
                "latitude": 45.46
            })),
        ))
        .await
        .unwrap();
    assert_eq!(create.status(), StatusCode::CREATED);
    let created = json_body(create).await;
    assert_eq!(created["data"]["is_active"], serde_json::json!(true));
    let lot_id = created["data"]["id"].as_i64().unwrap();

    // Same name while the first is still active conflicts.
    let duplicate = app
        .clone()
        .oneshot(authed(
            "POST",
            "/parking_lots",
            &access,
            Some(serde_json::json!({
                "name": "Downtown",
                "longitude": 0.0,
                "latitude": 0.0
            })),
        ))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let fetched = app
        .clone()
        .oneshot(authed(
            "GET",
            &format!("/parking_lots/{lot_id}"),
            &access,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);

    let updated = app
        .clone()
        .oneshot(authed(
            "PUT",
            &format!("/parking_lots/{lot_id}"),
            &access,
            Some(serde_json::json!({
                "name": "Downtown Central",
                "longitude": 9.20,
                "latitude": 45.47
            })),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = json_body(updated).await;
    assert_eq!(updated["data"]["name"], serde_json::json!("Downtown Central"));
    assert!(updated["data"]["updated_at"].is_string());

    let deleted = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/parking_lots/{lot_id}"),
            &access,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    // Deleted lots disappear from reads, and deleting again is not idempotent.
    let gone = app
        .clone()
        .oneshot(authed(
            "GET",
            &format!("/parking_lots/{lot_id}"),
            &access,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let delete_again = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/parking_lots/{lot_id}"),
            &access,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(delete_again.status(), StatusCode::NOT_FOUND);

    // The name is free again: re-creating it renames the shadow record.
    let recreate = app
        .clone()
        .oneshot(authed(
            "POST",
            "/parking_lots",
            &access,
            Some(serde_json::json!({
                "name": "Downtown Central",
                "longitude": 9.19,
                "latitude": 45.46
            })),
        ))
        .await
        .unwrap();
    assert_eq!(recreate.status(), StatusCode::CREATED);
    let recreated = json_body(recreate).await;
    assert_ne!(recreated["data"]["id"].as_i64().unwrap(), lot_id);
}

#[tokio::test]
async fn smoke_refresh_rotation_and_logout() {
    let (_, app) = spawn_app().await;
    let (access, refresh) = login(&app, "admin", "password").await;

    let refreshed = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/refresh")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({ "refresh_token": refresh }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(refreshed.status(), StatusCode::OK);
    let pair = json_body(refreshed).await;
    let new_access = pair["data"]["access_token"].as_str().unwrap().to_string();

    // The spent refresh token is revoked by rotation.
    let replay = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/refresh")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({ "refresh_token": refresh }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);

    let me = app
        .clone()
        .oneshot(authed("GET", "/auth/me", &new_access, None))
        .await
        .unwrap();
    assert_eq!(me.status(), StatusCode::OK);
    let me = json_body(me).await;
    assert_eq!(me["data"]["username"], serde_json::json!("admin"));

    let logout = app
        .clone()
        .oneshot(authed("POST", "/auth/logout", &new_access, None))
        .await
        .unwrap();
    assert_eq!(logout.status(), StatusCode::OK);

    // Revoked access token no longer authenticates.
    let revoked = app
        .clone()
        .oneshot(authed("GET", "/auth/me", &new_access, None))
        .await
        .unwrap();
    assert_eq!(revoked.status(), StatusCode::UNAUTHORIZED);

    // The first access token was never revoked and still works.
    let still_valid = app
        .clone()
        .oneshot(authed("GET", "/auth/me", &access, None))
        .await
        .unwrap();
    assert_eq!(still_valid.status(), StatusCode::OK);
}

#[tokio::test]
async fn smoke_registration_and_superuser_gating() {
    let (_, app) = spawn_app().await;

    let register = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/register")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "username": "driver",
                        "password": "driver-pass"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(register.status(), StatusCode::CREATED);
    let registered = json_body(register).await;
    let user_id = registered["data"]["id"].as_i64().unwrap();
    assert_eq!(registered["data"]["is_superuser"], serde_json::json!(false));

    let taken = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/register")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "username": "driver",
                        "password": "another-pass"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(taken.status(), StatusCode::CONFLICT);

    let (driver_access, _) = login(&app, "driver", "driver-pass").await;

    // Regular users cannot mutate lots or enumerate users.
    let forbidden_create = app
        .clone()
        .oneshot(authed(
            "POST",
            "/parking_lots",
            &driver_access,
            Some(serde_json::json!({
                "name": "Rogue Lot",
                "longitude": 0.0,
                "latitude": 0.0
            })),
        ))
        .await
        .unwrap();
    assert_eq!(forbidden_create.status(), StatusCode::FORBIDDEN);

    let forbidden_list = app
        .clone()
        .oneshot(authed("GET", "/users", &driver_access, None))
        .await
        .unwrap();
    assert_eq!(forbidden_list.status(), StatusCode::FORBIDDEN);

    // Users can read themselves.
    let me = app
        .clone()
        .oneshot(authed(
            "GET",
            &format!("/users/{user_id}"),
            &driver_access,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(me.status(), StatusCode::OK);

    // Promotion by the admin takes effect on the next request.
    let (admin_access, _) = login(&app, "admin", "password").await;
    let promote = app
        .clone()
        .oneshot(authed(
            "PUT",
            &format!("/users/{user_id}"),
            &admin_access,
            Some(serde_json::json!({ "is_superuser": true })),
        ))
        .await
        .unwrap();
    assert_eq!(promote.status(), StatusCode::OK);

    let allowed_create = app
        .clone()
        .oneshot(authed(
            "POST",
            "/parking_lots",
            &driver_access,
            Some(serde_json::json!({
                "name": "Promoted Lot",
                "longitude": 1.0,
                "latitude": 1.0
            })),
        ))
        .await
        .unwrap();
    assert_eq!(allowed_create.status(), StatusCode::CREATED);

    // Soft-deleting the user invalidates their outstanding tokens.
    let remove = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/users/{user_id}"),
            &admin_access,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(remove.status(), StatusCode::NO_CONTENT);

    let after_delete = app
        .clone()
        .oneshot(authed("GET", "/auth/me", &driver_access, None))
        .await
        .unwrap();
    assert_eq!(after_delete.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn smoke_vehicle_ownership() {
    let (_, app) = spawn_app().await;

    for username in ["alice", "bob"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/register")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "username": username,
                            "password": "vehicle-pass"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let (alice, _) = login(&app, "alice", "vehicle-pass").await;
    let (bob, _) = login(&app, "bob", "vehicle-pass").await;

    let create = app
        .clone()
        .oneshot(authed(
            "POST",
            "/vehicles",
            &alice,
            Some(serde_json::json!({
                "license_plate": "AB123CD",
                "vehicle_type": "car"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(create.status(), StatusCode::CREATED);
    let vehicle = json_body(create).await;
    let vehicle_id = vehicle["data"]["id"].as_i64().unwrap();
    assert_eq!(vehicle["data"]["is_tracked"], serde_json::json!(false));

    let duplicate_plate = app
        .clone()
        .oneshot(authed(
            "POST",
            "/vehicles",
            &bob,
            Some(serde_json::json!({
                "license_plate": "AB123CD",
                "vehicle_type": "car"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(duplicate_plate.status(), StatusCode::CONFLICT);

    // Ownership is not disclosed to other users.
    let hidden = app
        .clone()
        .oneshot(authed(
            "GET",
            &format!("/vehicles/{vehicle_id}"),
            &bob,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(hidden.status(), StatusCode::NOT_FOUND);

    let listed = app
        .clone()
        .oneshot(authed("GET", "/vehicles", &alice, None))
        .await
        .unwrap();
    assert_eq!(listed.status(), StatusCode::OK);
    let listed = json_body(listed).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let empty = app
        .clone()
        .oneshot(authed("GET", "/vehicles", &bob, None))
        .await
        .unwrap();
    let empty = json_body(empty).await;
    assert_eq!(empty["data"].as_array().unwrap().len(), 0);

    let deleted = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/vehicles/{vehicle_id}"),
            &alice,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
}
