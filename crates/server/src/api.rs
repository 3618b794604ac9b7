use dioxus::prelude::*;
use shared_types::{FeatureFlags, Identity, Role};

#[cfg(feature = "server")]
use crate::db::get_db;

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

/// Get the current feature flags. No auth required — flags are not sensitive.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}

/// Look up the stored role for `identity`, applying the configured tie-break.
///
/// Returns `Ok(None)` when the identity has no role rows. Lookup failures are
/// returned as errors; the client-side resolver turns both into `Role::User`.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn fetch_user_role(identity: Identity) -> Result<Option<Role>, ServerFnError> {
    use crate::role_store::PgRoleStore;
    use shared_types::RoleStore;

    let db = get_db().await.map_err(|e| e.into_server_fn_error())?;
    let store = PgRoleStore::new(db.clone(), crate::config::role_config().tie_break);
    store
        .fetch_role(&identity)
        .await
        .map_err(|e| e.into_server_fn_error())
}
