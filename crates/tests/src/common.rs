use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use server::db::AppState;
use shared_types::Identity;
use sqlx::{Pool, Postgres};
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

/// Global mutex ensuring tests run sequentially against the shared database.
/// Each test acquires this lock before truncating and seeding, preventing
/// concurrent tests from interfering with each other's data.
static TEST_MUTEX: std::sync::LazyLock<Mutex<()>> = std::sync::LazyLock::new(|| Mutex::new(()));

/// Connect to the test database, run migrations and truncate `user_roles`.
/// The returned `MutexGuard` must be held for the duration of the test.
pub async fn test_pool() -> (Pool<Postgres>, tokio::sync::MutexGuard<'static, ()>) {
    let guard = TEST_MUTEX.lock().await;

    let _ = dotenvy::dotenv();

    let database_url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("TEST_DATABASE_URL or DATABASE_URL must be set for tests");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    server::db::run_migrations(&pool).await;

    sqlx::query("TRUNCATE user_roles")
        .execute(&pool)
        .await
        .expect("Failed to truncate");

    (pool, guard)
}

/// Build the REST router against the test database.
pub async fn test_app() -> (Router, Pool<Postgres>, tokio::sync::MutexGuard<'static, ()>) {
    let (pool, guard) = test_pool().await;
    let router = server::rest::api_router().with_state(AppState::new(pool.clone()));
    (router, pool, guard)
}

/// Insert one role row per name for a fresh identity.
pub async fn seed_roles(pool: &Pool<Postgres>, roles: &[&str]) -> Identity {
    let identity = Identity::new(Uuid::new_v4());
    for role in roles {
        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
            .bind(identity.user_id)
            .bind(role)
            .execute(pool)
            .await
            .expect("Failed to seed role");
    }
    identity
}

/// Helper to make a GET request and return (status, parsed JSON body).
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}
