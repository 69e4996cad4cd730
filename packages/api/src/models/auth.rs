//! # Authentication payloads
//!
//! | Endpoint | Request | Success (2xx) | Failure |
//! |----------|---------|---------------|---------|
//! | `POST /login` | [`Credentials`] | [`AuthPayload`] | [`ErrorBody`] with `message` |
//! | `POST /register` | [`Registration`] | [`AuthPayload`] | [`ErrorBody`] with `message` and `errors` |
//! | `POST /admin/login` | [`Credentials`] | [`AuthPayload`], accepted only for `role == "admin"` | [`ErrorBody`] |

use serde::{Deserialize, Serialize};
use store::UserProfile;

use crate::error::FieldErrors;

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Token and profile returned by a successful login or registration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: UserProfile,
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: FieldErrors,
}
