use dioxus::prelude::*;
use store::SessionKind;

use crate::auth::use_session;
use crate::Route;

/// Public landing page.
#[component]
pub fn Home() -> Element {
    let user = use_session(SessionKind::User);
    let greeting = match user().user() {
        Some(profile) => format!("Welcome back, {}", profile.display_name()),
        None => "Welcome".to_string(),
    };

    rsx! {
        section {
            class: "home",
            h1 { "{greeting}" }
            p { "Take a breath, share a thought, or pick up a challenge." }
            ul {
                li { Link { to: Route::FreedomWall {}, "Freedom Wall" } }
                li { Link { to: Route::Challenges {}, "Challenges" } }
            }
        }
    }
}
