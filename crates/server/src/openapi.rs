use axum::Router;
use shared_types::{
    AdminTab, AppError, AppErrorKind, Capability, Identity, PermissionSet, Role, RoleSummary,
    TabAccessResponse, UserRoleResponse,
};
use sqlx::{Pool, Postgres};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::health;
use crate::rest;

/// OpenAPI documentation for the API.
#[derive(OpenApi)]
#[openapi(
    paths(
        rest::role::role_matrix,
        rest::role::get_user_role,
        rest::role::check_tab_access,
        health::health_check,
    ),
    components(schemas(
        Role, Capability, PermissionSet, AdminTab, Identity,
        RoleSummary, UserRoleResponse, TabAccessResponse,
        AppError, AppErrorKind,
        health::HealthResponse,
    )),
    tags(
        (name = "roles", description = "Role resolution and permission checks"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Stories Admin API",
        description = "Role and permission resolution for the stories admin dashboard",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build an Axum router that serves the API docs at `/docs`
/// and the REST API at `/api/*`.
pub fn api_router(pool: Pool<Postgres>) -> Router {
    let state = AppState::new(pool);

    Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
