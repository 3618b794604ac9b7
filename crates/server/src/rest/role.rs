use axum::extract::{Path, State};
use axum::Json;
use shared_types::{
    can_access_tab, AppError, Identity, Role, RoleResolver, RoleSummary, TabAccessResponse,
    UserRoleResponse,
};
use uuid::Uuid;

use crate::role_store::PgRoleStore;

// ---------------------------------------------------------------------------
// GET /api/v1/roles/matrix
// ---------------------------------------------------------------------------

/// Every role with its label, permission set and visible tabs.
#[utoipa::path(
    get,
    path = "/api/v1/roles/matrix",
    responses(
        (status = 200, description = "Role → permission matrix", body = Vec<RoleSummary>)
    ),
    tag = "roles"
)]
pub async fn role_matrix() -> Json<Vec<RoleSummary>> {
    Json(Role::ALL.into_iter().map(RoleSummary::from).collect())
}

// ---------------------------------------------------------------------------
// GET /api/v1/users/{user_id}/role
// ---------------------------------------------------------------------------

/// Resolve a user's role. Lookup failures and missing rows resolve to `user`.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/role",
    params(
        ("user_id" = Uuid, Path, description = "Identity issued by the auth provider")
    ),
    responses(
        (status = 200, description = "Resolved role", body = UserRoleResponse)
    ),
    tag = "roles"
)]
pub async fn get_user_role(
    State(store): State<PgRoleStore>,
    Path(user_id): Path<Uuid>,
) -> Json<UserRoleResponse> {
    let resolver = RoleResolver::new(store);
    let role = resolver.resolve(Some(Identity::new(user_id))).await;
    Json(UserRoleResponse {
        user_id,
        summary: RoleSummary::from(role),
    })
}

// ---------------------------------------------------------------------------
// GET /api/v1/roles/{role}/tabs/{tab}
// ---------------------------------------------------------------------------

/// Check whether a role may open an admin tab. Unknown tabs are denied.
#[utoipa::path(
    get,
    path = "/api/v1/roles/{role}/tabs/{tab}",
    params(
        ("role" = String, Path, description = "Role name, e.g. `moderator`"),
        ("tab" = String, Path, description = "Tab identifier, e.g. `posts`")
    ),
    responses(
        (status = 200, description = "Access decision", body = TabAccessResponse),
        (status = 404, description = "Unknown role", body = AppError)
    ),
    tag = "roles"
)]
pub async fn check_tab_access(
    Path((role, tab)): Path<(String, String)>,
) -> Result<Json<TabAccessResponse>, AppError> {
    let role = Role::parse(&role)
        .ok_or_else(|| AppError::not_found(format!("Unknown role '{}'", role)))?;
    let allowed = can_access_tab(role, &tab);
    Ok(Json(TabAccessResponse { role, tab, allowed }))
}
