//! Shared helpers for API integration tests.
//!
//! Tests drive the real router through `tower::ServiceExt::oneshot`, so
//! the full middleware stack (auth extraction, error mapping, request
//! ids) is exercised without binding a socket.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::util::ServiceExt;
use vexe_api::auth::jwt::{generate_access_token, JwtConfig};
use vexe_api::auth::password::hash_password;
use vexe_api::config::ServerConfig;
use vexe_api::router::build_app_router;
use vexe_api::state::AppState;
use vexe_core::types::DbId;
use vexe_db::models::user::CreateUser;
use vexe_db::repositories::UserRepo;

/// Role ids as seeded by the migrations.
pub const ROLE_ID_ADMIN: DbId = 1;
pub const ROLE_ID_STAFF: DbId = 2;
pub const ROLE_ID_CUSTOMER: DbId = 3;

/// Password used for every test account.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Deterministic server config for tests; no environment reads.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".into()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: JwtConfig {
            secret: "integration-test-secret-0123456789".into(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router against the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Insert a user with [`TEST_PASSWORD`] and return its id.
pub async fn seed_user(pool: &PgPool, username: &str, role_id: DbId) -> DbId {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.vn"),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing test password"),
            role_id,
        },
    )
    .await
    .expect("seeding test user");
    user.id
}

/// Mint a bearer token for a seeded user without going through login.
pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("generating test token")
}

/// Build the province/route/bus/driver fixture the trip tests need.
/// Returns `(route_id, bus_id, driver_id)`.
pub async fn seed_catalog(pool: &PgPool) -> (DbId, DbId, DbId) {
    use vexe_db::models::bus::CreateBus;
    use vexe_db::models::driver::CreateDriver;
    use vexe_db::models::province::CreateProvince;
    use vexe_db::models::route::CreateRoute;
    use vexe_db::repositories::{BusRepo, DriverRepo, ProvinceRepo, RouteRepo};

    let origin = ProvinceRepo::create(
        pool,
        &CreateProvince {
            name: "Hà Nội".into(),
            code: "HN".into(),
        },
    )
    .await
    .expect("seeding origin province");
    let destination = ProvinceRepo::create(
        pool,
        &CreateProvince {
            name: "Hải Phòng".into(),
            code: "HP".into(),
        },
    )
    .await
    .expect("seeding destination province");
    let route = RouteRepo::create(
        pool,
        &CreateRoute {
            origin_province_id: origin.id,
            destination_province_id: destination.id,
            distance_km: 120,
            duration_minutes: 150,
        },
    )
    .await
    .expect("seeding route");
    let bus = BusRepo::create(
        pool,
        &CreateBus {
            plate_number: "29B-12345".into(),
            model: Some("Thaco TB85".into()),
            seat_kind: "seater".into(),
            seat_count: 29,
        },
    )
    .await
    .expect("seeding bus");
    let driver = DriverRepo::create(
        pool,
        &CreateDriver {
            full_name: "Nguyễn Văn An".into(),
            phone: "0912345678".into(),
            license_no: "D123456".into(),
        },
    )
    .await
    .expect("seeding driver");

    (route.id, bus.id, driver.id)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("building test request");

    app.clone().oneshot(request).await.expect("routing test request")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "GET", uri, None, Some(token)).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, "POST", uri, Some(body), None).await
}

pub async fn post_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, "POST", uri, Some(body), Some(token)).await
}

pub async fn post_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "POST", uri, None, Some(token)).await
}

pub async fn put_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, "PUT", uri, Some(body), Some(token)).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "DELETE", uri, None, Some(token)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collecting response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parsing response body as JSON")
}

/// Assert a status and return the parsed JSON body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status, "unexpected response status");
    body_json(response).await
}
