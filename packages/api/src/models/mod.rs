//! Request and response bodies of the REST API.

mod auth;
mod content;

pub use auth::{AuthPayload, Credentials, ErrorBody, Registration};
pub use content::{percentage, Challenge, DashboardStats, Post};
