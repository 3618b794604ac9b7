use axum::extract::State;
use axum::Json;
use serde::Serialize;
use shared_types::RoleTieBreak;
use std::sync::OnceLock;
use std::time::Instant;

use crate::db::AppState;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the application start time. Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Health check response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the role store is unreachable.
    pub status: String,
    pub db: String,
    /// Active multi-row policy for role lookups (`lexical` or `highest_privilege`).
    pub role_tie_break: String,
    pub uptime_seconds: u64,
    pub version: String,
}

fn tie_break_name(tie_break: RoleTieBreak) -> &'static str {
    match tie_break {
        RoleTieBreak::Lexical => "lexical",
        RoleTieBreak::HighestPrivilege => "highest_privilege",
    }
}

/// Health check handler.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Role lookups still answer (with the default role) while the store is
    // down, so a failed probe degrades rather than fails the check.
    let (status, db_status) = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => ("ok", "connected".to_string()),
        Err(e) => ("degraded", format!("error: {e}")),
    };

    let uptime = START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0);

    Json(HealthResponse {
        status: status.to_string(),
        db: db_status,
        role_tie_break: tie_break_name(state.roles.tie_break()).to_string(),
        uptime_seconds: uptime,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
