use dioxus::prelude::*;

use crate::views::{
    AdminDashboard, AdminSignIn, AppLayout, Challenges, FreedomWall, Home, Register, SignIn,
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AppLayout)]
        #[route("/")]
        Home {},
        #[route("/signin")]
        SignIn {},
        #[route("/register")]
        Register {},
        #[route("/wall")]
        FreedomWall {},
        #[route("/challenges")]
        Challenges {},
        #[route("/admin/login")]
        AdminSignIn {},
        #[route("/admin")]
        AdminDashboard {},
}
