use serde::{Deserialize, Serialize};

use crate::role::Role;

/// A single admin capability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewDashboard,
    ManagePosts,
    ManageComments,
    ManageCircles,
    ManageUsers,
    ManageProfiles,
    ViewAnalytics,
    ManagePremiumContent,
    ManageDatabase,
    ManageSecurity,
    ManageSettings,
}

impl Capability {
    pub const ALL: [Capability; 11] = [
        Capability::ViewDashboard,
        Capability::ManagePosts,
        Capability::ManageComments,
        Capability::ManageCircles,
        Capability::ManageUsers,
        Capability::ManageProfiles,
        Capability::ViewAnalytics,
        Capability::ManagePremiumContent,
        Capability::ManageDatabase,
        Capability::ManageSecurity,
        Capability::ManageSettings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ViewDashboard => "view_dashboard",
            Capability::ManagePosts => "manage_posts",
            Capability::ManageComments => "manage_comments",
            Capability::ManageCircles => "manage_circles",
            Capability::ManageUsers => "manage_users",
            Capability::ManageProfiles => "manage_profiles",
            Capability::ViewAnalytics => "view_analytics",
            Capability::ManagePremiumContent => "manage_premium_content",
            Capability::ManageDatabase => "manage_database",
            Capability::ManageSecurity => "manage_security",
            Capability::ManageSettings => "manage_settings",
        }
    }

    /// Look up a capability by its snake_case name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Boolean capability flags derived from a [`Role`].
///
/// Never stored; always produced by [`permissions_for`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PermissionSet {
    pub view_dashboard: bool,
    pub manage_posts: bool,
    pub manage_comments: bool,
    pub manage_circles: bool,
    pub manage_users: bool,
    pub manage_profiles: bool,
    pub view_analytics: bool,
    pub manage_premium_content: bool,
    pub manage_database: bool,
    pub manage_security: bool,
    pub manage_settings: bool,
}

const NONE: PermissionSet = PermissionSet {
    view_dashboard: false,
    manage_posts: false,
    manage_comments: false,
    manage_circles: false,
    manage_users: false,
    manage_profiles: false,
    view_analytics: false,
    manage_premium_content: false,
    manage_database: false,
    manage_security: false,
    manage_settings: false,
};

const MODERATOR: PermissionSet = PermissionSet {
    view_dashboard: true,
    manage_posts: true,
    manage_comments: true,
    manage_circles: true,
    ..NONE
};

const ADMIN: PermissionSet = PermissionSet {
    manage_users: true,
    manage_profiles: true,
    view_analytics: true,
    manage_premium_content: true,
    ..MODERATOR
};

const SUPER_ADMIN: PermissionSet = PermissionSet {
    manage_database: true,
    manage_security: true,
    manage_settings: true,
    ..ADMIN
};

impl PermissionSet {
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ViewDashboard => self.view_dashboard,
            Capability::ManagePosts => self.manage_posts,
            Capability::ManageComments => self.manage_comments,
            Capability::ManageCircles => self.manage_circles,
            Capability::ManageUsers => self.manage_users,
            Capability::ManageProfiles => self.manage_profiles,
            Capability::ViewAnalytics => self.view_analytics,
            Capability::ManagePremiumContent => self.manage_premium_content,
            Capability::ManageDatabase => self.manage_database,
            Capability::ManageSecurity => self.manage_security,
            Capability::ManageSettings => self.manage_settings,
        }
    }

    /// Capabilities set to `true`, in declaration order.
    pub fn granted(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(|c| self.allows(*c))
    }
}

/// Capability flags for a role. Pure and total.
pub fn permissions_for(role: Role) -> PermissionSet {
    match role {
        Role::User => NONE,
        Role::Moderator => MODERATOR,
        Role::Admin => ADMIN,
        Role::SuperAdmin => SUPER_ADMIN,
    }
}

/// Check a capability by name. Unknown names are never granted.
pub fn has_permission(role: Role, capability: &str) -> bool {
    Capability::parse(capability)
        .map(|c| permissions_for(role).allows(c))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn permissions_are_deterministic() {
        for role in Role::ALL {
            let first = permissions_for(role);
            for _ in 0..3 {
                assert_eq!(permissions_for(role), first);
            }
        }
    }

    #[test]
    fn user_has_no_capabilities() {
        assert_eq!(permissions_for(Role::User).granted().count(), 0);
    }

    #[test]
    fn moderator_capabilities() {
        let granted: Vec<_> = permissions_for(Role::Moderator).granted().collect();
        assert_eq!(
            granted,
            vec![
                Capability::ViewDashboard,
                Capability::ManagePosts,
                Capability::ManageComments,
                Capability::ManageCircles,
            ]
        );
    }

    #[test]
    fn admin_lacks_platform_capabilities() {
        let admin = permissions_for(Role::Admin);
        assert!(admin.manage_users);
        assert!(admin.manage_premium_content);
        assert!(admin.view_analytics);
        assert!(!admin.manage_database);
        assert!(!admin.manage_security);
        assert!(!admin.manage_settings);
    }

    #[test]
    fn super_admin_has_everything() {
        let all = permissions_for(Role::SuperAdmin);
        assert!(Capability::ALL.iter().all(|c| all.allows(*c)));
    }

    #[test]
    fn higher_roles_are_supersets() {
        for pair in Role::ALL.windows(2) {
            let lower = permissions_for(pair[0]);
            let higher = permissions_for(pair[1]);
            for cap in lower.granted() {
                assert!(higher.allows(cap), "{:?} should keep {:?}", pair[1], cap);
            }
        }
    }

    #[test]
    fn has_permission_by_name() {
        assert!(has_permission(Role::Admin, "manage_users"));
        assert!(!has_permission(Role::Moderator, "manage_users"));
        assert!(!has_permission(Role::SuperAdmin, "launch_rockets"));
        assert!(!has_permission(Role::SuperAdmin, ""));
    }

    #[test]
    fn capability_names_round_trip() {
        for cap in Capability::ALL {
            assert_eq!(Capability::parse(cap.as_str()), Some(cap));
        }
    }
}
