use crate::auth::use_admin_permissions;
use crate::role_gate::RoleGate;
use crate::routes::RoleBadge;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdBell, LdBookOpen, LdFileText, LdFolder, LdLayoutDashboard, LdPackage, LdSearch, LdSettings,
    LdShield, LdUserCheck, LdUsers,
};
use dioxus_free_icons::Icon;
use shared_types::{AdminTab, Capability};

/// Admin dashboard page.
#[component]
pub fn AdminDashboard() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./admin.css") }
        AdminPanel {}
    }
}

/// Tab strip and active panel for the current user's permissions.
#[component]
pub fn AdminPanel() -> Element {
    let perms = use_admin_permissions();
    let mut active = use_signal(|| AdminTab::Overview);

    if perms.loading {
        return rsx! {
            div { class: "admin-loading", "Checking permissions..." }
        };
    }

    let tabs = perms.visible_tabs();
    let Some(first) = tabs.first().copied() else {
        return rsx! {
            div { class: "admin-denied",
                h2 { "Access denied" }
                p { "Your account does not have access to the admin dashboard." }
            }
        };
    };

    // A role change can hide the selected tab; fall back to the first visible one.
    let current = if tabs.contains(&active()) {
        active()
    } else {
        first
    };

    rsx! {
        div { class: "admin-dashboard",
            header { class: "admin-header",
                h2 { "Admin Dashboard" }
                RoleBadge { role: perms.role }
            }
            nav { class: "admin-tabs",
                for tab in tabs {
                    button {
                        key: "{tab.as_str()}",
                        class: if tab == current { "admin-tab active" } else { "admin-tab" },
                        "data-tab": tab.as_str(),
                        onclick: move |_| active.set(tab),
                        TabIcon { tab }
                        "{tab.label()}"
                    }
                }
            }
            section { class: "admin-panel",
                TabContent { tab: current }
            }
        }
    }
}

#[component]
fn TabIcon(tab: AdminTab) -> Element {
    match tab {
        AdminTab::Overview => rsx! { Icon { icon: LdLayoutDashboard, width: 16, height: 16 } },
        AdminTab::Posts => rsx! { Icon { icon: LdFileText, width: 16, height: 16 } },
        AdminTab::Comments => rsx! { Icon { icon: LdBell, width: 16, height: 16 } },
        AdminTab::Circles => rsx! { Icon { icon: LdUsers, width: 16, height: 16 } },
        AdminTab::Users => rsx! { Icon { icon: LdUserCheck, width: 16, height: 16 } },
        AdminTab::Profiles => rsx! { Icon { icon: LdFolder, width: 16, height: 16 } },
        AdminTab::Analytics => rsx! { Icon { icon: LdSearch, width: 16, height: 16 } },
        AdminTab::Premium => rsx! { Icon { icon: LdBookOpen, width: 16, height: 16 } },
        AdminTab::Database => rsx! { Icon { icon: LdPackage, width: 16, height: 16 } },
        AdminTab::Security => rsx! { Icon { icon: LdShield, width: 16, height: 16 } },
        AdminTab::Settings => rsx! { Icon { icon: LdSettings, width: 16, height: 16 } },
    }
}

fn tab_summary(tab: AdminTab) -> &'static str {
    match tab {
        AdminTab::Overview => "Activity across the community at a glance.",
        AdminTab::Posts => "Review, feature, or remove stories.",
        AdminTab::Comments => "Moderate comment threads.",
        AdminTab::Circles => "Manage circles and their membership.",
        AdminTab::Users => "Suspend, restore, and assign roles to accounts.",
        AdminTab::Profiles => "Review public profile details.",
        AdminTab::Analytics => "Engagement and growth reports.",
        AdminTab::Premium => "Premium content and subscriber perks.",
        AdminTab::Database => "Maintenance tasks for the data store.",
        AdminTab::Security => "Audit sign-ins and access policies.",
        AdminTab::Settings => "Platform-wide configuration.",
    }
}

#[component]
fn TabContent(tab: AdminTab) -> Element {
    let summary = tab_summary(tab);

    if tab == AdminTab::Premium {
        return rsx! {
            h3 { "{tab.label()}" }
            RoleGate {
                required: Capability::ManagePremiumContent,
                fallback: rsx! {
                    p { class: "premium-locked", "Premium tools require an admin role." }
                },
                p { "{summary}" }
            }
        };
    }

    rsx! {
        h3 { "{tab.label()}" }
        p { "{summary}" }
    }
}
