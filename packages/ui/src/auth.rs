//! Session context and hooks for the UI.
//!
//! [`SessionProvider`] turns the two [`SessionStore`](store::SessionStore)s into
//! signals. Each store pushes its changes through a subscription, so every
//! consumer reads the same value and re-renders only when a session actually
//! changed. The signals are seeded from the already-loaded stores, so the first
//! render never shows a logged-out state for a logged-in user.
//!
//! The storage warning banner is fed the same way: a store that degrades while
//! the provider is mounted reports it through
//! [`SessionStore::on_storage_warning`], even when the failed commit changed
//! nothing and so notified no session subscriber.

use std::rc::Rc;

use api::ApiClient;
use dioxus::prelude::*;
use store::{Session, SessionKind, SessionStore, Sessions, Subscription};

use crate::Route;

/// One signal per session kind.
#[derive(Clone, Copy)]
pub struct SessionSignals {
    pub user: Signal<Session>,
    pub admin: Signal<Session>,
}

/// The session stores, for flows that commit or clear.
pub fn use_sessions() -> Sessions {
    use_context::<Sessions>()
}

/// Reactive session of one kind.
pub fn use_session(kind: SessionKind) -> Signal<Session> {
    let signals = use_context::<SessionSignals>();
    match kind {
        SessionKind::User => signals.user,
        SessionKind::Admin => signals.admin,
    }
}

/// Non-reactive read, for event handlers.
pub fn get_session(kind: SessionKind) -> Session {
    consume_context::<Sessions>().get(kind).current()
}

/// API client provided by the platform's `App`.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

fn mirror(store: &SessionStore, signal: Signal<Session>) -> Subscription {
    store.subscribe(move |session| {
        let mut signal = signal;
        if *signal.peek() != *session {
            signal.set(session.clone());
        }
    })
}

fn surface_warning(store: &SessionStore, warning: Signal<Option<&'static str>>) -> Subscription {
    store.on_storage_warning(move |message| {
        let mut warning = warning;
        warning.set(Some(message));
    })
}

/// Provider component that publishes both sessions to its subtree.
/// Wrap your router with this component.
#[component]
pub fn SessionProvider(sessions: Sessions, children: Element) -> Element {
    let user = use_signal(|| sessions.user().current());
    let admin = use_signal(|| sessions.admin().current());
    let mut warning = use_signal(|| {
        let user_warning = sessions.user().take_storage_warning();
        let admin_warning = sessions.admin().take_storage_warning();
        user_warning.or(admin_warning)
    });

    // Held for the provider's lifetime; dropping it unsubscribes.
    let _subscriptions: Rc<[Subscription; 4]> = use_hook(|| {
        Rc::new([
            mirror(sessions.user(), user),
            mirror(sessions.admin(), admin),
            surface_warning(sessions.user(), warning),
            surface_warning(sessions.admin(), warning),
        ])
    });

    use_context_provider(|| sessions.clone());
    use_context_provider(|| SessionSignals { user, admin });

    rsx! {
        if let Some(message) = warning() {
            div {
                class: "storage-warning",
                role: "status",
                style: "padding: 0.5rem 1rem; background: #fff8e1; color: #6d4c00; font-size: 0.875rem; display: flex; justify-content: space-between;",
                span { "{message}" }
                button {
                    class: "storage-warning-dismiss",
                    onclick: move |_| warning.set(None),
                    "Dismiss"
                }
            }
        }
        {children}
    }
}

/// Button to log out of one session kind.
#[component]
pub fn LogoutButton(
    kind: SessionKind,
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let sessions = use_sessions();
    let nav = use_navigator();

    let onclick = move |_| {
        if let Err(e) = api::auth::sign_out(sessions.get(kind)) {
            tracing::warn!(%kind, error = %e, "logout was not persisted");
        }
        match kind {
            SessionKind::User => nav.replace(Route::SignIn {}),
            SessionKind::Admin => nav.replace(Route::AdminSignIn {}),
        };
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
