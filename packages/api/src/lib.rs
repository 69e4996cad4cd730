//! # API crate - client side of the wellness REST API
//!
//! Everything the UI needs to talk to the API server and turn its answers into
//! sessions.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: public auth endpoints, bearer-authenticated JSON calls, response decoding |
//! | [`auth`] | Sign-in / sign-up / admin sign-in / sign-out flows that commit into a [`store::SessionStore`] |
//! | [`models`] | Request and response bodies |
//! | [`error`] | [`ApiError`], the error every call and flow returns |
//!
//! ## Endpoints used
//!
//! - **Authentication**: `POST /login`, `POST /register`, `POST /admin/login`
//! - **Content**: `GET /posts`, `POST /posts`, `GET /challenges`
//! - **Admin**: `GET /admin/stats`, `DELETE /admin/posts/:id`
//!
//! Authenticated calls carry `Authorization: Bearer <token>`; a 401 comes back
//! as [`ApiError::Unauthorized`] and [`auth::handle_unauthorized`] clears the
//! offending session.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;

pub use client::ApiClient;
pub use error::{ApiError, FieldErrors};
pub use models::{AuthPayload, Challenge, Credentials, DashboardStats, Post, Registration};
