//! Catalog surface tests: provinces, routes, stops, buses, drivers,
//! and the role gates protecting their mutations.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use vexe_core::roles::{ROLE_CUSTOMER, ROLE_STAFF};

#[sqlx::test(migrations = "../db/migrations")]
async fn test_province_crud_as_staff(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let staff_id = common::seed_user(&pool, "nhan.vien", common::ROLE_ID_STAFF).await;
    let staff = common::token_for(staff_id, ROLE_STAFF);

    let created = common::post_json_auth(
        &app,
        "/api/v1/provinces",
        json!({"name": "Đà Nẵng", "code": "DN"}),
        &staff,
    )
    .await;
    let body = common::expect_json(created, StatusCode::CREATED).await;
    let id = body["id"].as_i64().unwrap();
    assert_eq!(body["name"], "Đà Nẵng");

    let updated = common::put_json_auth(
        &app,
        &format!("/api/v1/provinces/{id}"),
        json!({"code": "DNG"}),
        &staff,
    )
    .await;
    let updated_body = common::expect_json(updated, StatusCode::OK).await;
    assert_eq!(updated_body["code"], "DNG");
    assert_eq!(updated_body["name"], "Đà Nẵng");

    // Public read, no token.
    let listed = common::get(&app, "/api/v1/provinces").await;
    let listed_body = common::expect_json(listed, StatusCode::OK).await;
    assert_eq!(listed_body["data"].as_array().unwrap().len(), 1);

    let deleted = common::delete_auth(&app, &format!("/api/v1/provinces/{id}"), &staff).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = common::get(&app, &format!("/api/v1/provinces/{id}")).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_catalog_mutations_require_staff(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let customer_id = common::seed_user(&pool, "khach", common::ROLE_ID_CUSTOMER).await;
    let customer = common::token_for(customer_id, ROLE_CUSTOMER);

    let body = json!({"name": "Huế", "code": "HUE"});

    let anonymous = common::post_json(&app, "/api/v1/provinces", body.clone()).await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let forbidden = common::post_json_auth(&app, "/api/v1/provinces", body, &customer).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_province_name_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let staff_id = common::seed_user(&pool, "nhan.vien", common::ROLE_ID_STAFF).await;
    let staff = common::token_for(staff_id, ROLE_STAFF);

    let body = json!({"name": "Cần Thơ", "code": "CT"});
    let first = common::post_json_auth(&app, "/api/v1/provinces", body.clone(), &staff).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = common::post_json_auth(&app, "/api/v1/provinces", body, &staff).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_route_rejects_same_origin_and_destination(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let staff_id = common::seed_user(&pool, "nhan.vien", common::ROLE_ID_STAFF).await;
    let staff = common::token_for(staff_id, ROLE_STAFF);

    let province = common::post_json_auth(
        &app,
        "/api/v1/provinces",
        json!({"name": "Hà Nội", "code": "HN"}),
        &staff,
    )
    .await;
    let province_body = common::expect_json(province, StatusCode::CREATED).await;
    let province_id = province_body["id"].as_i64().unwrap();

    let response = common::post_json_auth(
        &app,
        "/api/v1/routes",
        json!({
            "origin_province_id": province_id,
            "destination_province_id": province_id,
            "distance_km": 50,
            "duration_minutes": 60,
        }),
        &staff,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_stops_nested_under_route(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let staff_id = common::seed_user(&pool, "nhan.vien", common::ROLE_ID_STAFF).await;
    let staff = common::token_for(staff_id, ROLE_STAFF);
    let (route_id, _, _) = common::seed_catalog(&pool).await;

    let first = common::post_json_auth(
        &app,
        &format!("/api/v1/routes/{route_id}/stops"),
        json!({"name": "Bến xe Mỹ Đình", "sequence_index": 0}),
        &staff,
    )
    .await;
    let first_body = common::expect_json(first, StatusCode::CREATED).await;
    // Pickup/dropoff default to true when omitted.
    assert_eq!(first_body["is_pickup"], true);
    assert_eq!(first_body["is_dropoff"], true);
    let stop_id = first_body["id"].as_i64().unwrap();

    let second = common::post_json_auth(
        &app,
        &format!("/api/v1/routes/{route_id}/stops"),
        json!({"name": "Bến xe Niệm Nghĩa", "sequence_index": 1, "is_pickup": false}),
        &staff,
    )
    .await;
    assert_eq!(second.status(), StatusCode::CREATED);

    let listed = common::get(&app, &format!("/api/v1/routes/{route_id}/stops")).await;
    let listed_body = common::expect_json(listed, StatusCode::OK).await;
    let stops = listed_body["data"].as_array().unwrap();
    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0]["name"], "Bến xe Mỹ Đình");

    // A stop addressed through another route's URL is not found.
    let wrong_route = common::delete_auth(
        &app,
        &format!("/api/v1/routes/{}/stops/{stop_id}", route_id + 999),
        &staff,
    )
    .await;
    assert_eq!(wrong_route.status(), StatusCode::NOT_FOUND);

    let deleted = common::delete_auth(
        &app,
        &format!("/api/v1/routes/{route_id}/stops/{stop_id}"),
        &staff,
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_bus_rejects_unknown_seat_kind(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let staff_id = common::seed_user(&pool, "nhan.vien", common::ROLE_ID_STAFF).await;
    let staff = common::token_for(staff_id, ROLE_STAFF);

    let response = common::post_json_auth(
        &app,
        "/api/v1/buses",
        json!({"plate_number": "30A-99999", "seat_kind": "double-decker", "seat_count": 40}),
        &staff,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_drivers_hidden_from_customers(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let customer_id = common::seed_user(&pool, "khach", common::ROLE_ID_CUSTOMER).await;
    let customer = common::token_for(customer_id, ROLE_CUSTOMER);

    let response = common::get_auth(&app, "/api/v1/drivers", &customer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_route_soft_delete_keeps_row(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let staff_id = common::seed_user(&pool, "nhan.vien", common::ROLE_ID_STAFF).await;
    let staff = common::token_for(staff_id, ROLE_STAFF);
    let (route_id, _, _) = common::seed_catalog(&pool).await;

    let deleted = common::delete_auth(&app, &format!("/api/v1/routes/{route_id}"), &staff).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    // The row survives as inactive.
    let fetched = common::get(&app, &format!("/api/v1/routes/{route_id}")).await;
    let body = common::expect_json(fetched, StatusCode::OK).await;
    assert_eq!(body["is_active"], false);

    let active_only = common::get(&app, "/api/v1/routes").await;
    let active_body = common::expect_json(active_only, StatusCode::OK).await;
    assert!(active_body["data"].as_array().unwrap().is_empty());

    let all = common::get(&app, "/api/v1/routes?include_inactive=true").await;
    let all_body = common::expect_json(all, StatusCode::OK).await;
    assert_eq!(all_body["data"].as_array().unwrap().len(), 1);
}
