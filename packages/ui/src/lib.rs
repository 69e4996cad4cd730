//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

mod auth;
pub use auth::{
    get_session, use_api, use_session, use_sessions, LogoutButton, SessionProvider,
    SessionSignals,
};

pub mod guard;
pub use guard::{evaluate, use_guard_decision, Access, Denied, GuardDecision, Guarded, Target};

pub mod fetch;
pub use fetch::{use_fetch_scope, FetchScope, FetchTicket};

mod navbar;
pub use navbar::Navbar;

mod route;
pub use route::Route;

pub mod views;

/// Root component shared by the platform binaries.
///
/// The binary opens the stores (so they are loaded before the first render)
/// and builds the API client; everything below reads both from context.
#[component]
pub fn Shell(sessions: store::Sessions, client: api::ApiClient) -> Element {
    use_context_provider(|| client);
    rsx! {
        SessionProvider {
            sessions,
            Router::<Route> {}
        }
    }
}
