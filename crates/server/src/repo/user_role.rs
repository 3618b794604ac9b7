use shared_types::{AppError, Role};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Storage names of every known role. Rows outside this set are ignored so a
/// stray value can never shadow a real role.
fn known_role_names() -> Vec<&'static str> {
    Role::ALL.iter().map(Role::as_str).collect()
}

/// First known role name for a user in ascending byte order of the name, or
/// `None` when the user has no such rows. `COLLATE "C"` keeps the order
/// independent of the database locale.
pub async fn first_role_lexical<'e>(
    db: impl PgExecutor<'e>,
    user_id: Uuid,
) -> Result<Option<String>, AppError> {
    sqlx::query_scalar::<_, String>(
        r#"SELECT role FROM user_roles
           WHERE user_id = $1 AND role = ANY($2)
           ORDER BY role COLLATE "C" ASC
           LIMIT 1"#,
    )
    .bind(user_id)
    .bind(known_role_names())
    .fetch_optional(db)
    .await
    .map_err(|e| e.into_app_error())
}

/// All role names stored for a user, in ascending name order. Unknown names
/// are returned as stored; the tie-break skips them.
pub async fn list_roles<'e>(
    db: impl PgExecutor<'e>,
    user_id: Uuid,
) -> Result<Vec<String>, AppError> {
    sqlx::query_scalar::<_, String>(
        r#"SELECT role FROM user_roles
           WHERE user_id = $1
           ORDER BY role COLLATE "C" ASC"#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .map_err(|e| e.into_app_error())
}
