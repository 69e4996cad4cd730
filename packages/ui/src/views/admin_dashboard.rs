//! Back-office dashboard: stats tiles and post moderation.

use api::{DashboardStats, Post};
use dioxus::prelude::*;
use store::SessionKind;

use crate::auth::{get_session, use_api, use_session, use_sessions};
use crate::fetch::use_fetch_scope;
use crate::guard::{Access, Guarded};
use crate::views::report_api_error;
use crate::Route;

#[component]
pub fn AdminDashboard() -> Element {
    rsx! {
        Guarded {
            access: Access::Admin,
            DashboardPanel {}
        }
    }
}

#[component]
fn StatTile(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "stat-tile",
            style: "flex: 1; padding: 1rem; border: 1px solid #eee; border-radius: 6px;",
            div { class: "stat-value", style: "font-size: 1.5rem; font-weight: 700;", "{value}" }
            div { class: "stat-label", "{label}" }
        }
    }
}

#[component]
fn DashboardPanel() -> Element {
    let admin = use_session(SessionKind::Admin);
    let sessions = use_sessions();
    let client = use_api();
    let scope = use_fetch_scope();
    let nav = use_navigator();
    let mut stats = use_signal(DashboardStats::default);
    let mut posts = use_signal(Vec::<Post>::new);
    let error = use_signal(|| Option::<String>::None);

    use_effect({
        let client = client.clone();
        let sessions = sessions.clone();
        move || {
            let session = admin();
            if !session.is_admin() {
                return;
            }
            let ticket = scope.begin();
            let client = client.clone();
            let sessions = sessions.clone();
            let scope = scope.clone();
            spawn(async move {
                let result = match client.get_json::<DashboardStats>("/admin/stats", &session).await {
                    Ok(fetched) => client
                        .get_json::<Vec<Post>>("/posts", &session)
                        .await
                        .map(|list| (fetched, list)),
                    Err(e) => Err(e),
                };
                if !scope.is_current(ticket) {
                    return;
                }
                match result {
                    Ok((fetched, list)) => {
                        stats.set(fetched);
                        posts.set(list);
                    }
                    Err(e) => report_api_error(&e, sessions.admin(), nav, Route::AdminSignIn {}, error),
                }
            });
        }
    });

    let remove_post = move |id: u64| {
        let client = client.clone();
        let sessions = sessions.clone();
        spawn(async move {
            let session = get_session(SessionKind::Admin);
            match client.delete(&format!("/admin/posts/{id}"), &session).await {
                Ok(()) => posts.write().retain(|p| p.id != id),
                Err(e) => report_api_error(&e, sessions.admin(), nav, Route::AdminSignIn {}, error),
            }
        });
    };

    let current = stats();

    rsx! {
        section {
            class: "admin-dashboard",
            h1 { "Dashboard" }

            if let Some(err) = error() {
                div { class: "form-error", role: "alert", "{err}" }
            }

            div {
                class: "stat-tiles",
                style: "display: flex; gap: 1rem; margin-bottom: 2rem;",
                StatTile { label: "Users", value: current.total_users.to_string() }
                StatTile { label: "Active", value: format!("{}%", current.active_share()) }
                StatTile { label: "Posts", value: current.total_posts.to_string() }
                StatTile { label: "Flagged", value: format!("{}%", current.flagged_share()) }
            }

            h2 { "Recent posts" }
            for post in posts() {
                div {
                    key: "{post.id}",
                    class: "moderation-row",
                    style: "display: flex; justify-content: space-between; gap: 1rem; padding: 0.5rem 0; border-bottom: 1px solid #eee;",
                    span { "{post.content}" }
                    button {
                        class: "danger",
                        onclick: {
                            let remove_post = remove_post.clone();
                            let id = post.id;
                            move |_| remove_post(id)
                        },
                        "Remove"
                    }
                }
            }
        }
    }
}
