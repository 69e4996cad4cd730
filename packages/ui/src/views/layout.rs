use dioxus::prelude::*;

use crate::{Navbar, Route};

/// Navbar above the routed page.
#[component]
pub fn AppLayout() -> Element {
    rsx! {
        Navbar {}
        main {
            class: "page",
            style: "max-width: 960px; margin: 0 auto; padding: 2rem 1rem;",
            Outlet::<Route> {}
        }
    }
}
