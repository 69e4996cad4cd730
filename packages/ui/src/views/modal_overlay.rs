use dioxus::prelude::*;

use crate::Route;

/// An overlay covering its positioned parent, centering its children in a card.
/// Clicking outside the card triggers `on_close` when one is given.
#[component]
pub fn ModalOverlay(on_close: Option<EventHandler<()>>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            style: "position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; background: rgba(0, 0, 0, 0.3); z-index: 2000;",
            onclick: move |_| {
                if let Some(handler) = on_close {
                    handler.call(());
                }
            },
            div {
                class: "modal-card",
                style: "background: #ffffff; border-radius: 8px; box-shadow: 0 4px 16px rgba(0, 0, 0, 0.15); max-width: 28rem; width: 100%; margin: 0 1rem;",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// The "please sign in to continue" card shown over a blurred preview.
#[component]
pub fn SignInOverlay() -> Element {
    rsx! {
        ModalOverlay {
            div {
                style: "padding: 1.5rem; text-align: center;",
                h2 { style: "margin: 0 0 0.5rem;", "Please sign in to continue" }
                p {
                    style: "margin: 0 0 1rem; color: #555;",
                    "Join the community to read and share on the freedom wall."
                }
                div {
                    style: "display: flex; gap: 0.75rem; justify-content: center;",
                    Link { to: Route::SignIn {}, class: "button button-primary", "Sign in" }
                    Link { to: Route::Register {}, class: "button", "Create an account" }
                }
            }
        }
    }
}
