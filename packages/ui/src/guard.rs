//! Route guard: decides whether a page renders, previews, or redirects.
//!
//! [`evaluate`] is the whole decision and is a pure function of the declared
//! [`Access`] and the two sessions. [`Guarded`] evaluates it once per render
//! and shares the result with everything below it through
//! [`use_guard_decision`], so sub-components never re-derive login state on
//! their own.

use dioxus::prelude::*;
use store::{Session, SessionKind};

use crate::auth::use_session;
use crate::views::SignInOverlay;
use crate::Route;

/// What a logged-out visitor sees on an `Authenticated` page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Denied {
    /// Blurred preview with a "please sign in" overlay.
    Overlay,
    /// Straight to the sign-in view.
    Redirect,
}

/// Access requirement declared by a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated(Denied),
    Admin,
}

/// Where a denied visitor is sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    SignIn,
    AdminSignIn,
    Home,
}

impl Target {
    pub fn route(self) -> Route {
        match self {
            Target::SignIn => Route::SignIn {},
            Target::AdminSignIn => Route::AdminSignIn {},
            Target::Home => Route::Home {},
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Preview,
    Redirect(Target),
}

impl GuardDecision {
    pub fn allows_content(self) -> bool {
        self == GuardDecision::Render
    }
}

/// Decide what to do with a page requiring `access`.
///
/// Only the presence of a validated session counts, so anything the store
/// could not validate arrives here as the empty session and is denied.
/// Admin pages look at the back-office session alone: a regular session is
/// never promoted, whatever its role.
pub fn evaluate(access: Access, user: &Session, admin: &Session) -> GuardDecision {
    match access {
        Access::Public => GuardDecision::Render,
        Access::Authenticated(denied) => {
            if user.is_logged_in() {
                GuardDecision::Render
            } else {
                match denied {
                    Denied::Overlay => GuardDecision::Preview,
                    Denied::Redirect => GuardDecision::Redirect(Target::SignIn),
                }
            }
        }
        Access::Admin => {
            if admin.is_admin() {
                GuardDecision::Render
            } else if user.is_logged_in() || admin.is_logged_in() {
                GuardDecision::Redirect(Target::Home)
            } else {
                GuardDecision::Redirect(Target::AdminSignIn)
            }
        }
    }
}

/// Decision of the nearest enclosing [`Guarded`].
pub fn use_guard_decision() -> Memo<GuardDecision> {
    use_context::<Memo<GuardDecision>>()
}

/// Decision for `access`, recomputed when either session or `access` changes.
fn use_decision(access: Access) -> Memo<GuardDecision> {
    let user = use_session(SessionKind::User);
    let admin = use_session(SessionKind::Admin);
    use_memo(use_reactive!(|(access,)| {
        evaluate(access, &user.read(), &admin.read())
    }))
}

/// Wrap a page's content in its access requirement.
#[component]
pub fn Guarded(access: Access, children: Element) -> Element {
    let decision = use_decision(access);
    use_context_provider(|| decision);
    let nav = use_navigator();

    match decision() {
        GuardDecision::Render => rsx! { {children} },
        GuardDecision::Preview => rsx! {
            div {
                class: "guard-preview",
                style: "position: relative;",
                div {
                    class: "guard-preview-content",
                    style: "filter: blur(4px); pointer-events: none; user-select: none;",
                    {children}
                }
                SignInOverlay {}
            }
        },
        GuardDecision::Redirect(target) => {
            tracing::debug!(?access, ?target, "guard redirect");
            nav.replace(target.route());
            rsx! {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use api::ApiClient;
    use dioxus_history::{History, MemoryHistory};
    use store::{ClientConfig, MemoryStore, Role, Sessions, UserProfile};

    use super::*;
    use crate::auth::SessionProvider;
    use crate::{Shell, ShellProps};

    thread_local! {
        static ACCESS: Cell<Access> = const { Cell::new(Access::Public) };
    }

    /// Passes whatever `ACCESS` holds at render time down as a prop.
    #[component]
    fn Switcher(sessions: Sessions) -> Element {
        let access = ACCESS.with(Cell::get);
        rsx! {
            SessionProvider { sessions, DecisionLabel { access } }
        }
    }

    #[component]
    fn DecisionLabel(access: Access) -> Element {
        let decision = use_decision(access);
        let label = format!("{:?}", decision());
        rsx! {
            span { "{label}" }
        }
    }

    fn open() -> Sessions {
        Sessions::open(MemoryStore::new(), &ClientConfig::default())
    }

    fn logged_in(role: Role) -> Session {
        open().user().commit("tok", UserProfile::new(1, role)).unwrap()
    }

    /// Requests from this client fail before leaving the process.
    fn offline_client() -> ApiClient {
        ApiClient::new(&ClientConfig::default().with_base_url(""))
    }

    struct App {
        dom: VirtualDom,
        history: Rc<MemoryHistory>,
    }

    impl App {
        fn mount(sessions: &Sessions, path: &str) -> Self {
            let history = Rc::new(MemoryHistory::with_initial_path(path));
            let mut dom = VirtualDom::new_with_props(
                Shell,
                ShellProps {
                    sessions: sessions.clone(),
                    client: offline_client(),
                },
            );
            dom.provide_root_context(history.clone() as Rc<dyn History>);
            dom.rebuild_in_place();
            Self { dom, history }
        }

        fn settle(&mut self) {
            settle(&mut self.dom);
        }

        fn html(&self) -> String {
            dioxus_ssr::render(&self.dom)
        }

        fn route(&self) -> String {
            self.history.current_route()
        }
    }

    fn settle(dom: &mut VirtualDom) {
        for _ in 0..4 {
            dom.process_events();
            let _ = dom.render_immediate_to_vec();
        }
    }

    #[test]
    fn test_public_always_renders() {
        let empty = Session::empty();
        assert_eq!(evaluate(Access::Public, &empty, &empty), GuardDecision::Render);
    }

    #[test]
    fn test_authenticated_denies_empty_session() {
        let empty = Session::empty();
        assert_eq!(
            evaluate(Access::Authenticated(Denied::Overlay), &empty, &empty),
            GuardDecision::Preview
        );
        assert_eq!(
            evaluate(Access::Authenticated(Denied::Redirect), &empty, &empty),
            GuardDecision::Redirect(Target::SignIn)
        );
    }

    #[test]
    fn test_regular_user_gets_authenticated_but_not_admin() {
        let user = logged_in(Role::User);
        let empty = Session::empty();
        assert_eq!(
            evaluate(Access::Authenticated(Denied::Overlay), &user, &empty),
            GuardDecision::Render
        );
        assert_eq!(
            evaluate(Access::Admin, &user, &empty),
            GuardDecision::Redirect(Target::Home)
        );
    }

    #[test]
    fn test_admin_access_needs_back_office_session() {
        let admin = logged_in(Role::Admin);
        let empty = Session::empty();
        assert_eq!(evaluate(Access::Admin, &empty, &admin), GuardDecision::Render);
        assert_eq!(
            evaluate(Access::Admin, &empty, &empty),
            GuardDecision::Redirect(Target::AdminSignIn)
        );
        // An admin role on the regular session does not open the back office.
        assert_eq!(
            evaluate(Access::Admin, &admin, &empty),
            GuardDecision::Redirect(Target::Home)
        );
    }

    #[test]
    fn test_login_then_logout_flips_decision() {
        let sessions = open();
        let access = Access::Authenticated(Denied::Redirect);

        let session = sessions
            .user()
            .commit(
                "tok123",
                UserProfile::new(5, Role::User)
                    .with_name("A")
                    .with_email("a@b.com"),
            )
            .unwrap();
        assert!(session.is_logged_in());
        assert!(!session.is_admin());
        assert_eq!(
            evaluate(access, &sessions.user().current(), &sessions.admin().current()),
            GuardDecision::Render
        );

        sessions.user().clear().unwrap();
        assert_eq!(
            evaluate(access, &sessions.user().current(), &sessions.admin().current()),
            GuardDecision::Redirect(Target::SignIn)
        );
    }

    #[test]
    fn test_corrupt_storage_fails_closed() {
        let backend = MemoryStore::new();
        store::KeyValueStore::set(&backend, "wellness.token", "tok").unwrap();
        store::KeyValueStore::set(&backend, "wellness.user", r#"{"id":1}"#).unwrap();
        let sessions = Sessions::open(backend, &ClientConfig::default());
        assert_eq!(
            evaluate(
                Access::Authenticated(Denied::Overlay),
                &sessions.user().current(),
                &sessions.admin().current()
            ),
            GuardDecision::Preview
        );
    }

    #[test]
    fn test_wall_preview_follows_login_and_logout() {
        let sessions = open();
        let mut app = App::mount(&sessions, "/wall");
        let html = app.html();
        assert!(html.contains("guard-preview"));
        assert!(html.contains("Please sign in to continue"));
        assert!(!html.contains("wall-composer"));

        app.dom.in_runtime(|| {
            sessions
                .user()
                .commit("tok", UserProfile::new(3, Role::User))
                .unwrap();
        });
        app.settle();
        let html = app.html();
        assert!(!html.contains("guard-preview"));
        assert!(html.contains("wall-composer"));

        app.dom.in_runtime(|| sessions.user().clear().unwrap());
        app.settle();
        let html = app.html();
        assert!(html.contains("guard-preview"));
        assert!(!html.contains("wall-composer"));
        assert_eq!(app.route(), "/wall");
    }

    #[test]
    fn test_challenges_send_visitor_to_sign_in() {
        let sessions = open();
        let app = App::mount(&sessions, "/challenges");
        assert_eq!(app.route(), "/signin");
        assert!(!app.html().contains("challenge-points"));
    }

    #[test]
    fn test_logout_on_guarded_page_redirects() {
        let sessions = open();
        sessions
            .user()
            .commit("tok", UserProfile::new(3, Role::User))
            .unwrap();
        let mut app = App::mount(&sessions, "/challenges");
        assert_eq!(app.route(), "/challenges");
        assert!(app.html().contains("challenge-points"));

        app.dom.in_runtime(|| sessions.user().clear().unwrap());
        app.settle();
        assert_eq!(app.route(), "/signin");
    }

    #[test]
    fn test_admin_page_redirect_depends_on_who_is_signed_in() {
        let app = App::mount(&open(), "/admin");
        assert_eq!(app.route(), "/admin/login");

        let regular = open();
        regular
            .user()
            .commit("tok", UserProfile::new(3, Role::Admin))
            .unwrap();
        let app = App::mount(&regular, "/admin");
        assert_eq!(app.route(), "/");

        let back_office = open();
        back_office
            .admin()
            .commit("adm", UserProfile::new(4, Role::Admin))
            .unwrap();
        let app = App::mount(&back_office, "/admin");
        assert_eq!(app.route(), "/admin");
        assert!(app.html().contains("admin-dashboard"));
    }

    #[test]
    fn test_decision_follows_access_prop() {
        ACCESS.with(|access| access.set(Access::Public));
        let mut dom = VirtualDom::new_with_props(Switcher, SwitcherProps { sessions: open() });
        dom.rebuild_in_place();
        assert!(dioxus_ssr::render(&dom).contains("Render"));

        // Same component instance, new requirement.
        ACCESS.with(|access| access.set(Access::Authenticated(Denied::Redirect)));
        dom.mark_dirty(ScopeId::APP);
        settle(&mut dom);
        assert!(dioxus_ssr::render(&dom).contains("Redirect(SignIn)"));
    }
}
