use axum::http::StatusCode;

use crate::common::{get_json, seed_roles, test_app};

#[tokio::test]
async fn user_role_endpoint_returns_stored_role() {
    let (app, pool, _guard) = test_app().await;
    let identity = seed_roles(&pool, &["admin"]).await;

    let uri = format!("/api/v1/users/{}/role", identity.user_id);
    let (status, body) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], identity.user_id.to_string());
    assert_eq!(body["role"], "admin");
    assert_eq!(body["label"], "Admin");
    assert_eq!(body["permissions"]["manage_users"], true);
    assert_eq!(body["permissions"]["manage_database"], false);
}

#[tokio::test]
async fn user_role_endpoint_without_rows_is_user() {
    let (app, _pool, _guard) = test_app().await;

    let uri = format!("/api/v1/users/{}/role", uuid::Uuid::new_v4());
    let (status, body) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "user");
    assert_eq!(body["tabs"], serde_json::json!([]));
}

#[tokio::test]
async fn user_role_endpoint_uses_lexical_tie_break_by_default() {
    let (app, pool, _guard) = test_app().await;
    let identity = seed_roles(&pool, &["admin", "super_admin"]).await;

    let uri = format!("/api/v1/users/{}/role", identity.user_id);
    let (_, body) = get_json(&app, &uri).await;
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn health_is_ok_with_database() {
    let (pool, _guard) = crate::common::test_pool().await;
    let app = server::openapi::api_router(pool);

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "connected");
}
