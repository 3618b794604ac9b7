use serde::{Deserialize, Serialize};

use crate::permission::{permissions_for, Capability};
use crate::role::Role;

/// A section of the admin dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum AdminTab {
    Overview,
    Posts,
    Comments,
    Circles,
    Users,
    Profiles,
    Analytics,
    Premium,
    Database,
    Security,
    Settings,
}

/// Tab → capability gate. Tabs missing from this table are never shown.
pub const TAB_ACCESS: &[(AdminTab, Capability)] = &[
    (AdminTab::Overview, Capability::ViewDashboard),
    (AdminTab::Posts, Capability::ManagePosts),
    (AdminTab::Comments, Capability::ManageComments),
    (AdminTab::Circles, Capability::ManageCircles),
    (AdminTab::Users, Capability::ManageUsers),
    (AdminTab::Profiles, Capability::ManageProfiles),
    (AdminTab::Analytics, Capability::ViewAnalytics),
    (AdminTab::Premium, Capability::ManagePremiumContent),
    (AdminTab::Database, Capability::ManageDatabase),
    (AdminTab::Security, Capability::ManageSecurity),
    (AdminTab::Settings, Capability::ManageSettings),
];

impl AdminTab {
    pub const ALL: [AdminTab; 11] = [
        AdminTab::Overview,
        AdminTab::Posts,
        AdminTab::Comments,
        AdminTab::Circles,
        AdminTab::Users,
        AdminTab::Profiles,
        AdminTab::Analytics,
        AdminTab::Premium,
        AdminTab::Database,
        AdminTab::Security,
        AdminTab::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminTab::Overview => "overview",
            AdminTab::Posts => "posts",
            AdminTab::Comments => "comments",
            AdminTab::Circles => "circles",
            AdminTab::Users => "users",
            AdminTab::Profiles => "profiles",
            AdminTab::Analytics => "analytics",
            AdminTab::Premium => "premium",
            AdminTab::Database => "database",
            AdminTab::Security => "security",
            AdminTab::Settings => "settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdminTab::Overview => "Overview",
            AdminTab::Posts => "Posts",
            AdminTab::Comments => "Comments",
            AdminTab::Circles => "Circles",
            AdminTab::Users => "Users",
            AdminTab::Profiles => "Profiles",
            AdminTab::Analytics => "Analytics",
            AdminTab::Premium => "Premium",
            AdminTab::Database => "Database",
            AdminTab::Security => "Security",
            AdminTab::Settings => "Settings",
        }
    }

    /// Exact match on the tab identifier.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Capability gating this tab, if the tab is in the access table.
    pub fn required_capability(&self) -> Option<Capability> {
        TAB_ACCESS
            .iter()
            .find(|(tab, _)| tab == self)
            .map(|(_, cap)| *cap)
    }

    pub fn is_visible_to(&self, role: Role) -> bool {
        self.required_capability()
            .map(|cap| permissions_for(role).allows(cap))
            .unwrap_or(false)
    }
}

/// Whether `role` may open the tab named `tab`. Unknown names are denied.
pub fn can_access_tab(role: Role, tab: &str) -> bool {
    AdminTab::parse(tab)
        .map(|t| t.is_visible_to(role))
        .unwrap_or(false)
}

/// Tabs visible to `role`, in dashboard order.
pub fn visible_tabs(role: Role) -> Vec<AdminTab> {
    TAB_ACCESS
        .iter()
        .map(|(tab, _)| *tab)
        .filter(|tab| tab.is_visible_to(role))
        .collect()
}
