use axum::extract::FromRef;
use shared_types::AppError;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use crate::error_convert::SqlxErrorExt;
use crate::role_store::PgRoleStore;

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract `State<PgPool>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: Pool<Postgres>,
    pub roles: PgRoleStore,
}

impl AppState {
    /// Build state with the role store configured from `config.toml`.
    pub fn new(pool: Pool<Postgres>) -> Self {
        let roles = PgRoleStore::new(pool.clone(), crate::config::role_config().tie_break);
        Self { pool, roles }
    }
}

/// Pool created lazily — no connections are opened until the first query.
/// Each `#[tokio::test]` creates its own runtime, so nothing may bind to a
/// runtime at init time.
static POOL: OnceLock<Pool<Postgres>> = OnceLock::new();
static MIGRATED: AtomicBool = AtomicBool::new(false);

/// Build a lazy pool from `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS`.
fn try_create_pool() -> Result<Pool<Postgres>, AppError> {
    // Load .env file if present (ignored in production where env vars are set directly).
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| AppError::unavailable("DATABASE_URL is not set"))?;

    let max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy(&database_url)
        .map_err(|e| e.into_app_error())
}

/// Create a new database connection pool from environment variables.
/// Uses `connect_lazy` so no connections open until the first query.
pub fn create_pool() -> Pool<Postgres> {
    try_create_pool().expect("Failed to create database pool")
}

/// Apply pending migrations, reporting failures instead of panicking.
pub async fn migrate(pool: &Pool<Postgres>) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| match e {
            MigrateError::Execute(err) => err.into_app_error(),
            other => AppError::database(format!("Migration failed: {other}")),
        })
}

/// Run database migrations against the given pool. Startup aborts on failure.
pub async fn run_migrations(pool: &Pool<Postgres>) {
    migrate(pool)
        .await
        .expect("Failed to run database migrations");
}

/// Get or initialize the database connection pool.
///
/// Migrations run on the first call that reaches the database; a failed
/// attempt is retried on the next call. Used by Dioxus server functions
/// (`api.rs`), which must turn an unreachable store into an error rather
/// than a panic. REST handlers use `State<AppState>` instead.
pub async fn get_db() -> Result<&'static Pool<Postgres>, AppError> {
    let pool = match POOL.get() {
        Some(pool) => pool,
        None => {
            let created = try_create_pool()?;
            POOL.get_or_init(|| created)
        }
    };

    if !MIGRATED.load(Ordering::SeqCst) {
        migrate(pool).await?;
        MIGRATED.store(true, Ordering::SeqCst);
    }

    Ok(pool)
}
