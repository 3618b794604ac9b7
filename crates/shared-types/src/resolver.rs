use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::AppError;
use crate::models::Identity;
use crate::role::Role;

/// How to pick one role when storage holds several rows for an identity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoleTieBreak {
    /// First row in ascending order of the stored role name. `admin` wins over
    /// `super_admin`, `moderator` wins over `user`.
    #[default]
    Lexical,
    /// Highest privilege wins.
    HighestPrivilege,
}

impl RoleTieBreak {
    /// Pick one role out of the stored role names. Unknown names are skipped.
    pub fn select<S: AsRef<str>>(&self, rows: &[S]) -> Option<Role> {
        let known = rows.iter().map(AsRef::as_ref).filter_map(|name| {
            let role = Role::parse(name);
            if role.is_none() {
                tracing::warn!(role = name, "Ignoring unknown stored role");
            }
            role
        });
        match self {
            RoleTieBreak::Lexical => known.min_by_key(|r| r.as_str()),
            RoleTieBreak::HighestPrivilege => known.max(),
        }
    }
}

/// Read access to the external role store.
#[allow(async_fn_in_trait)]
pub trait RoleStore: Send + Sync {
    /// The single role stored for `identity`, after the store's tie-break.
    /// `Ok(None)` when the identity has no role rows.
    async fn fetch_role(&self, identity: &Identity) -> Result<Option<Role>, AppError>;
}

impl<S: RoleStore> RoleStore for std::sync::Arc<S> {
    async fn fetch_role(&self, identity: &Identity) -> Result<Option<Role>, AppError> {
        (**self).fetch_role(identity).await
    }
}

/// Observable state of the most recent resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "role", rename_all = "snake_case")]
pub enum ResolveStatus {
    #[default]
    Unresolved,
    Loading,
    Resolved(Role),
}

impl ResolveStatus {
    /// Role to display. Anything short of a settled resolution shows `User`.
    pub fn role(&self) -> Role {
        match self {
            ResolveStatus::Resolved(role) => *role,
            ResolveStatus::Unresolved | ResolveStatus::Loading => Role::User,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ResolveStatus::Loading)
    }
}

#[derive(Debug, Default)]
struct ResolverState {
    generation: u64,
    identity: Option<Identity>,
    status: ResolveStatus,
}

/// Resolves the role of the current identity.
///
/// Every call to [`resolve`](Self::resolve) takes a generation token; only the
/// call holding the latest token may publish its result, so a slow lookup for
/// a previous identity never overwrites the role of the current one.
pub struct RoleResolver<S> {
    store: S,
    state: Mutex<ResolverState>,
}

impl<S: RoleStore> RoleResolver<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: Mutex::new(ResolverState::default()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn state(&self) -> MutexGuard<'_, ResolverState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> ResolveStatus {
        self.state().status
    }

    pub fn role(&self) -> Role {
        self.status().role()
    }

    pub fn is_loading(&self) -> bool {
        self.status().is_loading()
    }

    /// Identity of the latest resolution, `None` once logged out.
    pub fn identity(&self) -> Option<Identity> {
        self.state().identity
    }

    /// Forget the current identity and fall back to `User`.
    /// In-flight lookups are invalidated.
    pub fn reset(&self) {
        let mut state = self.state();
        state.generation = state.generation.wrapping_add(1);
        state.identity = None;
        state.status = ResolveStatus::Resolved(Role::User);
    }

    /// Resolve the role for `identity`. Never fails: a missing identity, an
    /// identity without rows, or a store error all yield `User`.
    ///
    /// The returned role belongs to `identity`; [`status`](Self::status) only
    /// reflects it while `identity` is still the latest one requested.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, identity: Option<Identity>) -> Role {
        let Some(identity) = identity else {
            self.reset();
            return Role::User;
        };

        let token = {
            let mut state = self.state();
            state.generation = state.generation.wrapping_add(1);
            state.identity = Some(identity);
            state.status = ResolveStatus::Loading;
            state.generation
        };

        let role = collapse(self.store.fetch_role(&identity).await);

        let mut state = self.state();
        if state.generation == token {
            state.status = ResolveStatus::Resolved(role);
        } else {
            tracing::debug!(role = %role, "Discarding stale role resolution");
        }
        role
    }
}

/// Collapse a lookup result into a role, logging failures.
fn collapse(result: Result<Option<Role>, AppError>) -> Role {
    match result {
        Ok(Some(role)) => role,
        Ok(None) => {
            tracing::debug!("No stored role; using default");
            Role::User
        }
        Err(e) if e.is_transient() => {
            tracing::warn!(error = %e, "Role store unreachable; using default");
            Role::User
        }
        Err(e) => {
            tracing::error!(error = %e, "Role lookup failed; using default");
            Role::User
        }
    }
}
