use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::permission::{permissions_for, PermissionSet};
use crate::role::Role;
use crate::tab::{visible_tabs, AdminTab};

/// Opaque reference to an authenticated subject, issued by the auth provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Identity {
    pub user_id: Uuid,
}

impl Identity {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Signed-in user as reported by the auth provider (safe to send to client).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl AuthUser {
    pub fn identity(&self) -> Identity {
        Identity::new(self.id)
    }
}

/// A role together with everything derived from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RoleSummary {
    pub role: Role,
    pub label: String,
    pub rank: u8,
    pub permissions: PermissionSet,
    pub tabs: Vec<AdminTab>,
}

impl From<Role> for RoleSummary {
    fn from(role: Role) -> Self {
        Self {
            role,
            label: role.label().to_string(),
            rank: role.rank(),
            permissions: permissions_for(role),
            tabs: visible_tabs(role),
        }
    }
}

/// Resolved role for one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserRoleResponse {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub summary: RoleSummary,
}

/// Result of a single tab access check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TabAccessResponse {
    pub role: Role,
    pub tab: String,
    pub allowed: bool,
}
