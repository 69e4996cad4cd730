use api::Challenge;
use dioxus::prelude::*;
use store::SessionKind;

use crate::auth::{use_api, use_session, use_sessions};
use crate::fetch::use_fetch_scope;
use crate::guard::{Access, Denied, Guarded};
use crate::views::report_api_error;
use crate::Route;

/// Challenge list. Visitors are sent to sign in.
#[component]
pub fn Challenges() -> Element {
    rsx! {
        Guarded {
            access: Access::Authenticated(Denied::Redirect),
            ChallengeList {}
        }
    }
}

#[component]
fn ChallengeList() -> Element {
    let session = use_session(SessionKind::User);
    let sessions = use_sessions();
    let client = use_api();
    let scope = use_fetch_scope();
    let nav = use_navigator();
    let mut challenges = use_signal(|| Option::<Vec<Challenge>>::None);
    let error = use_signal(|| Option::<String>::None);

    use_effect(move || {
        let current = session();
        let ticket = scope.begin();
        let client = client.clone();
        let sessions = sessions.clone();
        let scope = scope.clone();
        spawn(async move {
            let result = client.get_json::<Vec<Challenge>>("/challenges", &current).await;
            if !scope.is_current(ticket) {
                return;
            }
            match result {
                Ok(list) => challenges.set(Some(list)),
                Err(e) => report_api_error(&e, sessions.user(), nav, Route::SignIn {}, error),
            }
        });
    });

    let earned: u32 = challenges
        .read()
        .iter()
        .flatten()
        .filter(|c| c.completed)
        .map(|c| c.points)
        .sum();

    rsx! {
        section {
            class: "challenges",
            h1 { "Challenges" }
            p { class: "challenge-points", "Points earned: {earned}" }

            if let Some(err) = error() {
                div { class: "form-error", role: "alert", "{err}" }
            }

            match challenges() {
                None => rsx! { p { "Loading challenges..." } },
                Some(list) if list.is_empty() => rsx! { p { "No challenges yet. Check back soon." } },
                Some(list) => rsx! {
                    ul {
                        for challenge in list {
                            li {
                                key: "{challenge.id}",
                                class: if challenge.completed { "challenge done" } else { "challenge" },
                                strong { "{challenge.title}" }
                                " ({challenge.points} pts)"
                                if let Some(description) = challenge.description.as_ref() {
                                    p { "{description}" }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
