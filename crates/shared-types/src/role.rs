use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Platform role controlling access to the admin dashboard.
///
/// - `User` — default for every identity. No admin access.
/// - `Moderator` — content moderation: posts, comments, circles.
/// - `Admin` — moderation plus people, analytics and premium content.
/// - `SuperAdmin` — everything, including database, security and settings.
///
/// Ordering follows privilege, not the lexical order of the stored names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Moderator,
    Admin,
    SuperAdmin,
}

impl Role {
    /// All roles, least privileged first.
    pub const ALL: [Role; 4] = [Role::User, Role::Moderator, Role::Admin, Role::SuperAdmin];

    /// Numeric rank for privilege comparison.
    pub fn rank(&self) -> u8 {
        match self {
            Role::User => 0,
            Role::Moderator => 1,
            Role::Admin => 2,
            Role::SuperAdmin => 3,
        }
    }

    /// Parse a stored role name. Unknown values are not representable.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "user" => Some(Role::User),
            "moderator" => Some(Role::Moderator),
            "admin" => Some(Role::Admin),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    /// Parse a stored role name, defaulting to `User` for unknown values.
    pub fn from_str_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Lowercase string for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// Fixed display string.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Moderator => "Moderator",
            Role::Admin => "Admin",
            Role::SuperAdmin => "Super Admin",
        }
    }

    /// Returns true if this role is at least as privileged as `required`.
    pub fn satisfies(&self, required: &Role) -> bool {
        self.rank() >= required.rank()
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display label for a role.
pub fn role_label(role: Role) -> &'static str {
    role.label()
}
