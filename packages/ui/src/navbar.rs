use dioxus::prelude::*;
use store::SessionKind;

use crate::auth::{use_session, LogoutButton};
use crate::Route;

/// Top navigation. Reads the session context instead of storage, so it
/// agrees with every guarded page at all times.
#[component]
pub fn Navbar() -> Element {
    let user = use_session(SessionKind::User);
    let admin = use_session(SessionKind::Admin);
    let current = user();
    let back_office = admin();

    rsx! {
        nav {
            class: "navbar",
            style: "display: flex; gap: 1rem; align-items: center; padding: 0.75rem 1.5rem; border-bottom: 1px solid #e5e5e5;",
            Link { to: Route::Home {}, class: "navbar-brand", "Wellness" }
            Link { to: Route::FreedomWall {}, "Freedom Wall" }
            Link { to: Route::Challenges {}, "Challenges" }
            if back_office.is_admin() {
                Link { to: Route::AdminDashboard {}, "Admin" }
            }

            div { style: "flex: 1;" }

            if let Some(profile) = current.user() {
                span { class: "navbar-user", "{profile.display_name()}" }
                LogoutButton { kind: SessionKind::User, class: "navbar-logout" }
            } else {
                Link { to: Route::SignIn {}, "Sign in" }
                Link { to: Route::Register {}, "Register" }
            }
            if back_office.is_logged_in() {
                LogoutButton {
                    kind: SessionKind::Admin,
                    label: "Leave admin",
                    class: "navbar-logout",
                }
            }
        }
    }
}
