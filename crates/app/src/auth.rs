use std::rc::Rc;

use dioxus::prelude::*;
use shared_types::{
    permissions_for, AdminTab, AppError, AuthUser, Capability, Identity, PermissionSet, Role,
    RoleResolver, RoleStore,
};

/// Global authentication state.
///
/// The identity provider's session hook writes to it with `set_user` on
/// sign-in and `clear_auth` on sign-out; role resolution follows those writes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub current_user: Signal<Option<AuthUser>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            current_user: Signal::new(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.read().is_some()
    }

    pub fn set_user(&mut self, user: AuthUser) {
        self.current_user.set(Some(user));
    }

    pub fn clear_auth(&mut self) {
        self.current_user.set(None);
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// Role store that asks the server for the identity's role.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerRoleStore;

impl RoleStore for ServerRoleStore {
    async fn fetch_role(&self, identity: &Identity) -> Result<Option<Role>, AppError> {
        server::api::fetch_user_role(*identity).await.map_err(|e| {
            let message = e.to_string();
            AppError::from_server_error(&message).unwrap_or_else(|| AppError::internal(message))
        })
    }
}

/// Resolved role of the signed-in user, shared through context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UserRoleState {
    pub role: Signal<Role>,
    pub loading: Signal<bool>,
}

/// Resolve the current identity's role and provide it to descendants.
///
/// Called once from `App`. Resolution re-runs whenever the identity changes;
/// a lookup that finishes after a newer one started leaves no trace.
pub fn use_role_provider() -> UserRoleState {
    use_role_provider_with(|| ServerRoleStore)
}

/// [`use_role_provider`] over an arbitrary role store.
pub fn use_role_provider_with<S, F>(make_store: F) -> UserRoleState
where
    S: RoleStore + 'static,
    F: FnOnce() -> S,
{
    let auth = use_auth();
    let resolver = use_hook(|| Rc::new(RoleResolver::new(make_store())));
    let mut role = use_signal(Role::default);
    let mut loading = use_signal(|| false);

    // Only the identity matters; profile edits must not trigger a lookup.
    let identity = use_memo(move || auth.current_user.read().as_ref().map(AuthUser::identity));

    use_effect(move || {
        let identity = identity();
        tracing::debug!(user_id = ?identity.map(|i| i.user_id), "Identity changed; resolving role");

        // The previous identity's role must not outlive the identity.
        role.set(Role::User);

        let Some(identity) = identity else {
            resolver.reset();
            loading.set(false);
            return;
        };

        loading.set(true);
        let resolver = resolver.clone();
        spawn(async move {
            resolver.resolve(Some(identity)).await;
            let status = resolver.status();
            role.set(status.role());
            loading.set(status.is_loading());
        });
    });

    use_context_provider(|| UserRoleState { role, loading })
}

/// Hook to read the current user's resolved role.
pub fn use_user_role() -> UserRoleState {
    use_context::<UserRoleState>()
}

/// Snapshot of what the current user may do in the admin area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdminPermissions {
    pub role: Role,
    pub permissions: PermissionSet,
    pub loading: bool,
}

impl AdminPermissions {
    pub fn label(&self) -> &'static str {
        self.role.label()
    }

    /// Always false while the role is loading.
    pub fn has(&self, capability: Capability) -> bool {
        !self.loading && self.permissions.allows(capability)
    }

    /// Unknown tab names are denied, as is everything while loading.
    pub fn can_access_tab(&self, tab: &str) -> bool {
        AdminTab::parse(tab)
            .and_then(|t| t.required_capability())
            .map(|c| self.has(c))
            .unwrap_or(false)
    }

    pub fn visible_tabs(&self) -> Vec<AdminTab> {
        AdminTab::ALL
            .into_iter()
            .filter(|t| t.required_capability().is_some_and(|c| self.has(c)))
            .collect()
    }
}

/// Permission flags for the current user, recomputed only when the role changes.
pub fn use_admin_permissions() -> AdminPermissions {
    let state = use_user_role();
    let permissions = use_memo(move || permissions_for(*state.role.read()));

    let result = AdminPermissions {
        role: *state.role.read(),
        permissions: *permissions.read(),
        loading: *state.loading.read(),
    };
    result
}
