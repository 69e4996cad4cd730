//! Sign-in page for regular users.

use api::Credentials;
use dioxus::prelude::*;
use store::SessionKind;

use crate::auth::{use_api, use_session, use_sessions};
use crate::Route;

#[component]
pub fn SignIn() -> Element {
    let user = use_session(SessionKind::User);
    let sessions = use_sessions();
    let client = use_api();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already signed in
    if user().is_logged_in() {
        nav.replace(Route::FreedomWall {});
    }

    let handle_sign_in = move |evt: FormEvent| {
        evt.prevent_default();
        let sessions = sessions.clone();
        let client = client.clone();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();
            if e.is_empty() || !e.contains('@') {
                error.set(Some("Please enter a valid email".to_string()));
                return;
            }
            if p.is_empty() {
                error.set(Some("Please enter your password".to_string()));
                return;
            }

            loading.set(true);
            let credentials = Credentials { email: e, password: p };
            match api::auth::sign_in(&client, sessions.user(), &credentials).await {
                Ok(_) => {
                    nav.push(Route::FreedomWall {});
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.user_message()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            style: "display: flex; flex-direction: column; align-items: center; padding: 2rem;",

            h1 { "Sign in" }

            form {
                onsubmit: handle_sign_in,
                style: "display: flex; flex-direction: column; gap: 0.75rem; width: 100%; max-width: 320px;",

                if let Some(err) = error() {
                    div { class: "form-error", role: "alert", "{err}" }
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                "No account yet? "
                Link { to: Route::Register {}, "Create one" }
            }
        }
    }
}
