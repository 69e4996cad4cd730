//! Registration page view with email/password form.

use api::{FieldErrors, Registration};
use dioxus::prelude::*;
use store::SessionKind;

use crate::auth::{use_api, use_session, use_sessions};
use crate::Route;

#[component]
pub fn Register() -> Element {
    let user = use_session(SessionKind::User);
    let sessions = use_sessions();
    let client = use_api();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(FieldErrors::new);
    let mut loading = use_signal(|| false);

    if user().is_logged_in() {
        nav.replace(Route::FreedomWall {});
    }

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let sessions = sessions.clone();
        let client = client.clone();
        spawn(async move {
            error.set(None);
            field_errors.set(FieldErrors::new());

            let e = email().trim().to_string();
            let p = password();
            let cp = confirm_password();

            if e.is_empty() || !e.contains('@') {
                error.set(Some("Please enter a valid email".to_string()));
                return;
            }
            if p.len() < 8 {
                error.set(Some("Password must be at least 8 characters".to_string()));
                return;
            }
            if p != cp {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            loading.set(true);
            let registration = Registration {
                email: e,
                password: p,
                password_confirmation: cp,
            };
            match api::auth::sign_up(&client, sessions.user(), &registration).await {
                Ok(_) => {
                    nav.push(Route::FreedomWall {});
                }
                Err(e) => {
                    loading.set(false);
                    if let Some(errors) = e.field_errors() {
                        field_errors.set(errors.clone());
                    }
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let field_messages: Vec<(String, String)> = field_errors
        .read()
        .iter()
        .flat_map(|(field, messages)| messages.iter().map(move |m| (field.clone(), m.clone())))
        .collect();

    rsx! {
        div {
            class: "auth-page",
            style: "display: flex; flex-direction: column; align-items: center; padding: 2rem;",

            h1 { "Create account" }

            form {
                onsubmit: handle_register,
                style: "display: flex; flex-direction: column; gap: 0.75rem; width: 100%; max-width: 320px;",

                if let Some(err) = error() {
                    div { class: "form-error", role: "alert", "{err}" }
                }
                if !field_messages.is_empty() {
                    ul {
                        class: "form-field-errors",
                        for (i, (field, message)) in field_messages.into_iter().enumerate() {
                            li { key: "{i}", strong { "{field}: " } "{message}" }
                        }
                    }
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Password (min 8 characters)",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: confirm_password(),
                    oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                }

                button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign up" }
                }
            }

            p {
                "Already have an account? "
                Link { to: Route::SignIn {}, "Sign in" }
            }
        }
    }
}
