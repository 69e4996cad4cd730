//! The freedom wall: signed-in users read and post; visitors get a blurred
//! teaser under the sign-in overlay.

use api::Post;
use dioxus::prelude::*;
use serde::Serialize;
use store::SessionKind;

use crate::auth::{get_session, use_api, use_session, use_sessions};
use crate::fetch::use_fetch_scope;
use crate::guard::{use_guard_decision, Access, Denied, Guarded};
use crate::views::report_api_error;
use crate::Route;

#[derive(Serialize)]
struct NewPost {
    content: String,
}

#[component]
pub fn FreedomWall() -> Element {
    rsx! {
        Guarded {
            access: Access::Authenticated(Denied::Overlay),
            WallFeed {}
        }
    }
}

fn teaser_posts() -> Vec<Post> {
    [
        "Finals week is rough, but we've got this.",
        "Took a walk between classes today and it helped a lot.",
        "Reminder: drink water and sleep!",
    ]
    .into_iter()
    .enumerate()
    .map(|(i, content)| Post {
        id: i as u64 + 1,
        content: content.to_string(),
        author: None,
        created_at: None,
    })
    .collect()
}

#[component]
fn WallFeed() -> Element {
    let decision = use_guard_decision();
    let session = use_session(SessionKind::User);
    let sessions = use_sessions();
    let client = use_api();
    let scope = use_fetch_scope();
    let nav = use_navigator();
    let mut posts = use_signal(Vec::<Post>::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut draft = use_signal(String::new);
    let mut posting = use_signal(|| false);

    // Runs again whenever the session or the guard decision changes.
    use_effect({
        let client = client.clone();
        let sessions = sessions.clone();
        move || {
            let current = session();
            if !decision().allows_content() {
                posts.set(teaser_posts());
                return;
            }
            let ticket = scope.begin();
            let client = client.clone();
            let sessions = sessions.clone();
            let scope = scope.clone();
            spawn(async move {
                let result = client.get_json::<Vec<Post>>("/posts", &current).await;
                if !scope.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(fetched) => {
                        error.set(None);
                        posts.set(fetched);
                    }
                    Err(e) => report_api_error(&e, sessions.user(), nav, Route::SignIn {}, error),
                }
            });
        }
    });

    let handle_post = move |evt: FormEvent| {
        evt.prevent_default();
        let content = draft().trim().to_string();
        if content.is_empty() {
            return;
        }
        let client = client.clone();
        let sessions = sessions.clone();
        spawn(async move {
            posting.set(true);
            let current = get_session(SessionKind::User);
            let result: Result<Post, _> = client
                .post_json("/posts", &NewPost { content }, &current)
                .await;
            posting.set(false);
            match result {
                Ok(post) => {
                    draft.set(String::new());
                    posts.write().insert(0, post);
                }
                Err(e) => report_api_error(&e, sessions.user(), nav, Route::SignIn {}, error),
            }
        });
    };

    rsx! {
        section {
            class: "freedom-wall",
            h1 { "Freedom Wall" }

            if decision().allows_content() {
                form {
                    class: "wall-composer",
                    onsubmit: handle_post,
                    style: "display: flex; flex-direction: column; gap: 0.5rem; margin-bottom: 1.5rem;",
                    textarea {
                        placeholder: "Share what's on your mind...",
                        rows: "3",
                        value: draft(),
                        oninput: move |evt: FormEvent| draft.set(evt.value()),
                    }
                    button {
                        r#type: "submit",
                        disabled: posting(),
                        if posting() { "Posting..." } else { "Post" }
                    }
                }
            }

            if let Some(err) = error() {
                div { class: "form-error", role: "alert", "{err}" }
            }

            for post in posts() {
                article {
                    key: "{post.id}",
                    class: "wall-post",
                    style: "padding: 1rem; border: 1px solid #eee; border-radius: 6px; margin-bottom: 0.75rem;",
                    p { "{post.content}" }
                    if let Some(author) = post.author.as_ref() {
                        small { "posted by {author}" }
                    }
                }
            }
        }
    }
}
