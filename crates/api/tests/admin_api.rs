//! Admin user-management tests.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use vexe_core::roles::{ROLE_ADMIN, ROLE_STAFF};

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_creates_and_manages_staff_account(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin_id = common::seed_user(&pool, "quan.tri", common::ROLE_ID_ADMIN).await;
    let admin = common::token_for(admin_id, ROLE_ADMIN);

    let created = common::post_json_auth(
        &app,
        "/api/v1/admin/users",
        json!({
            "username": "nhan.vien.moi",
            "email": "nv@example.com",
            "password": common::TEST_PASSWORD,
            "role_id": common::ROLE_ID_STAFF,
        }),
        &admin,
    )
    .await;
    let body = common::expect_json(created, StatusCode::CREATED).await;
    assert_eq!(body["role"], "staff");
    assert!(body.get("password_hash").is_none());
    let user_id = body["id"].as_i64().unwrap();

    // The new account can log in.
    let login = common::post_json(
        &app,
        "/api/v1/auth/login",
        json!({"username": "nhan.vien.moi", "password": common::TEST_PASSWORD}),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);

    let listed = common::get_auth(&app, "/api/v1/admin/users", &admin).await;
    let listed_body = common::expect_json(listed, StatusCode::OK).await;
    assert_eq!(listed_body["data"].as_array().unwrap().len(), 2);

    let updated = common::put_json_auth(
        &app,
        &format!("/api/v1/admin/users/{user_id}"),
        json!({"email": "nv.doi@example.com"}),
        &admin,
    )
    .await;
    let updated_body = common::expect_json(updated, StatusCode::OK).await;
    assert_eq!(updated_body["email"], "nv.doi@example.com");

    // Deactivation blocks future logins.
    let deleted = common::delete_auth(&app, &format!("/api/v1/admin/users/{user_id}"), &admin).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let blocked = common::post_json(
        &app,
        "/api/v1/auth/login",
        json!({"username": "nhan.vien.moi", "password": common::TEST_PASSWORD}),
    )
    .await;
    assert_eq!(blocked.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_routes_reject_staff(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let staff_id = common::seed_user(&pool, "nhan.vien", common::ROLE_ID_STAFF).await;
    let staff = common::token_for(staff_id, ROLE_STAFF);

    let response = common::get_auth(&app, "/api/v1/admin/users", &staff).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_password_reset_revokes_sessions(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin_id = common::seed_user(&pool, "quan.tri", common::ROLE_ID_ADMIN).await;
    let user_id = common::seed_user(&pool, "doi.mat.khau", common::ROLE_ID_CUSTOMER).await;
    let admin = common::token_for(admin_id, ROLE_ADMIN);

    let login = common::post_json(
        &app,
        "/api/v1/auth/login",
        json!({"username": "doi.mat.khau", "password": common::TEST_PASSWORD}),
    )
    .await;
    let login_body = common::expect_json(login, StatusCode::OK).await;
    let refresh_token = login_body["refresh_token"].as_str().unwrap().to_string();

    let reset = common::post_json_auth(
        &app,
        &format!("/api/v1/admin/users/{user_id}/reset-password"),
        json!({"new_password": "another-long-password"}),
        &admin,
    )
    .await;
    assert_eq!(reset.status(), StatusCode::NO_CONTENT);

    // Old refresh tokens die with the reset.
    let refresh = common::post_json(
        &app,
        "/api/v1/auth/refresh",
        json!({"refresh_token": refresh_token}),
    )
    .await;
    assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);

    // The new password works.
    let relogin = common::post_json(
        &app,
        "/api/v1/auth/login",
        json!({"username": "doi.mat.khau", "password": "another-long-password"}),
    )
    .await;
    assert_eq!(relogin.status(), StatusCode::OK);
}
