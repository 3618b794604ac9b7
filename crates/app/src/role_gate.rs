use crate::auth::use_admin_permissions;
use dioxus::prelude::*;
use shared_types::Capability;

/// Check if the current user holds a capability. False while the role is loading.
pub fn use_capability_check(required: Capability) -> bool {
    use_admin_permissions().has(required)
}

/// Conditionally render children based on the user's capabilities.
/// Shows `fallback` if the capability is missing.
#[component]
pub fn RoleGate(required: Capability, fallback: Element, children: Element) -> Element {
    let has_access = use_capability_check(required);

    if has_access {
        rsx! { {children} }
    } else {
        rsx! { {fallback} }
    }
}
