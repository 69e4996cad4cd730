use api::ApiError;
use dioxus::prelude::*;
use store::SessionStore;

use crate::Route;

mod layout;
pub use layout::AppLayout;

mod modal_overlay;
pub use modal_overlay::{ModalOverlay, SignInOverlay};

mod home;
pub use home::Home;

mod sign_in;
pub use sign_in::SignIn;

mod register;
pub use register::Register;

mod admin_sign_in;
pub use admin_sign_in::AdminSignIn;

mod freedom_wall;
pub use freedom_wall::FreedomWall;

mod challenges;
pub use challenges::Challenges;

mod admin_dashboard;
pub use admin_dashboard::AdminDashboard;

/// Handle a failed API call from a page.
///
/// A 401 clears `store` and sends the visitor to `sign_in`; anything else is
/// written to `error` as a retryable message.
pub(crate) fn report_api_error(
    err: &ApiError,
    store: &SessionStore,
    nav: Navigator,
    sign_in: Route,
    mut error: Signal<Option<String>>,
) {
    if api::auth::handle_unauthorized(err, store) {
        nav.replace(sign_in);
        return;
    }
    tracing::error!(error = %err, "API call failed");
    error.set(Some(err.user_message()));
}
