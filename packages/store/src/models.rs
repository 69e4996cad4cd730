//! # Session data model
//!
//! The types every other package passes around when it talks about "who is
//! using this client right now".
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Role`] | The profile's role. `"user"` and `"admin"` are known; anything else is kept as [`Role::Other`] and never grants admin access. |
//! | [`UserProfile`] | The user record handed out by `/login`, `/register` and `/admin/login`. `id` and `role` are required, `name` and `email` optional. |
//! | [`Session`] | Token plus profile, or nothing. The pair is stored together so a token without a user (or the reverse) cannot be represented. |
//! | [`SessionKind`] | Regular user vs. back office. Each kind has its own store and storage keys. |

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Role carried by a [`UserProfile`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Admin,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Other(other) => other,
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "user" => Role::User,
            "admin" => Role::Admin,
            other => Role::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Role::from(raw.as_str()))
    }
}

/// Profile of the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserProfile {
    pub fn new(id: u64, role: Role) -> Self {
        Self {
            id,
            role,
            name: None,
            email: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Name for headers and greetings, falling back to the email, then the id.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| format!("user #{}", self.id))
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Current login state for one [`SessionKind`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    inner: Option<(String, UserProfile)>,
}

impl Session {
    /// The logged-out session.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Callers go through [`crate::SessionStore::commit`], which validates first.
    pub(crate) fn new(token: String, user: UserProfile) -> Self {
        Self {
            inner: Some((token, user)),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.inner.as_ref().map(|(token, _)| token.as_str())
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.inner.as_ref().map(|(_, user)| user)
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(UserProfile::is_admin)
    }
}

/// Which of the two independent sessions a store tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionKind {
    User,
    Admin,
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKind::User => f.write_str("user"),
            SessionKind::Admin => f.write_str("admin"),
        }
    }
}

/// Storage key pair for one [`SessionKind`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageKeys {
    pub token: String,
    pub user: String,
}

impl StorageKeys {
    /// Keys under `prefix`: `token`/`user` for users, `adminToken`/`adminUser` for admins.
    pub fn for_kind(prefix: &str, kind: SessionKind) -> Self {
        let (token, user) = match kind {
            SessionKind::User => ("token", "user"),
            SessionKind::Admin => ("adminToken", "adminUser"),
        };
        if prefix.is_empty() {
            return Self {
                token: token.to_string(),
                user: user.to_string(),
            };
        }
        Self {
            token: format!("{prefix}.{token}"),
            user: format!("{prefix}.{user}"),
        }
    }
}
