pub mod admin;
pub mod not_found;

use crate::auth::{use_admin_permissions, use_auth};
use dioxus::prelude::*;

use admin::AdminDashboard;
use not_found::NotFound;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[layout(AppLayout)]
    #[route("/")]
    Home {},
    #[route("/admin")]
    AdminDashboard {},
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Top bar with the signed-in user and their role badge.
#[component]
fn AppLayout() -> Element {
    let auth = use_auth();
    let perms = use_admin_permissions();
    let user = auth.current_user.read().clone();

    rsx! {
        div { class: "app-shell",
            header { class: "app-header",
                Link { to: Route::Home {}, "Stories" }
                if let Some(user) = user {
                    span { class: "app-user", "{user.display_name}" }
                    if !perms.loading {
                        RoleBadge { role: perms.role }
                    }
                }
            }
            main { Outlet::<Route> {} }
        }
    }
}

/// Pill showing a role's display label.
#[component]
pub fn RoleBadge(role: shared_types::Role) -> Element {
    rsx! {
        span { class: "role-badge role-{role}", "{role.label()}" }
    }
}

#[component]
fn Home() -> Element {
    let auth = use_auth();
    let perms = use_admin_permissions();

    if !auth.is_authenticated() {
        return rsx! {
            p { class: "app-loading", "Sign in to continue." }
        };
    }

    if perms.loading {
        return rsx! {
            p { class: "app-loading", "Checking permissions..." }
        };
    }

    rsx! {
        h1 { "Welcome back" }
        if perms.has(shared_types::Capability::ViewDashboard) {
            Link { to: Route::AdminDashboard {}, "Open admin dashboard" }
        }
    }
}
