pub mod role;

use axum::{routing::get, Router};
use crate::db::AppState;

/// Build the REST API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/roles/matrix", get(role::role_matrix))
        .route("/api/v1/roles/{role}/tabs/{tab}", get(role::check_tab_access))
        .route("/api/v1/users/{user_id}/role", get(role::get_user_role))
}
