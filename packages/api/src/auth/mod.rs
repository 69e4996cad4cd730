//! Sign-in, registration and sign-out flows.
//!
//! Each flow resolves the HTTP call first and only then hands the
//! token + profile to [`SessionStore::commit`]. A flow writes to exactly one
//! store, so a failed admin sign-in never touches the regular session and the
//! reverse.

use store::{Role, Session, SessionKind, SessionStore};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AuthPayload, Credentials, Registration};

pub const NOT_AN_ADMIN: &str = "This account does not have administrator access.";

pub async fn sign_in(
    client: &ApiClient,
    store: &SessionStore,
    credentials: &Credentials,
) -> Result<Session, ApiError> {
    let payload = client.login(credentials).await?;
    accept_login(store, payload)
}

pub async fn sign_up(
    client: &ApiClient,
    store: &SessionStore,
    registration: &Registration,
) -> Result<Session, ApiError> {
    if registration.password != registration.password_confirmation {
        return Err(ApiError::rejected("Passwords do not match"));
    }
    let payload = client.register(registration).await?;
    accept_login(store, payload)
}

pub async fn admin_sign_in(
    client: &ApiClient,
    admin_store: &SessionStore,
    credentials: &Credentials,
) -> Result<Session, ApiError> {
    let payload = client.admin_login(credentials).await?;
    accept_admin_login(admin_store, payload)
}

/// Commit a successful `/login` or `/register` response.
pub fn accept_login(store: &SessionStore, payload: AuthPayload) -> Result<Session, ApiError> {
    let session = store.commit(payload.token, payload.user)?;
    tracing::info!(kind = %store.kind(), "signed in");
    Ok(session)
}

/// Commit a `/admin/login` response, refusing any role but `admin`.
pub fn accept_admin_login(
    admin_store: &SessionStore,
    payload: AuthPayload,
) -> Result<Session, ApiError> {
    if admin_store.kind() != SessionKind::Admin {
        return Err(ApiError::rejected("admin sign-in needs the admin session store"));
    }
    if payload.user.role != Role::Admin {
        tracing::warn!(user = payload.user.id, role = %payload.user.role, "non-admin attempted admin sign-in");
        return Err(ApiError::rejected(NOT_AN_ADMIN));
    }
    accept_login(admin_store, payload)
}

/// Log out of one session kind. The in-memory session is always cleared.
pub fn sign_out(store: &SessionStore) -> Result<(), ApiError> {
    store.clear()?;
    tracing::info!(kind = %store.kind(), "signed out");
    Ok(())
}

/// Clear `store` if `error` says its token was refused. Returns whether it did.
pub fn handle_unauthorized(error: &ApiError, store: &SessionStore) -> bool {
    if !matches!(error, ApiError::Unauthorized) {
        return false;
    }
    if let Err(e) = store.clear() {
        tracing::warn!(kind = %store.kind(), error = %e, "could not erase rejected session");
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::decode_response;
    use store::{ClientConfig, MemoryStore, Sessions, UserProfile};

    fn sessions(backend: &MemoryStore) -> Sessions {
        Sessions::open(backend.clone(), &ClientConfig::default())
    }

    fn payload(token: &str, id: u64, role: Role) -> AuthPayload {
        AuthPayload {
            token: token.to_string(),
            user: UserProfile::new(id, role),
        }
    }

    #[test]
    fn test_login_response_commits_user_session() {
        let backend = MemoryStore::new();
        let sessions = sessions(&backend);
        let body = r#"{"token":"tok123","user":{"id":5,"name":"A","email":"a@b.com","role":"user"}}"#;
        let payload: AuthPayload = decode_response(200, body).unwrap();

        let session = accept_login(sessions.user(), payload).unwrap();
        assert!(session.is_logged_in());
        assert!(!session.is_admin());
        assert_eq!(sessions.user().current(), session);
        assert!(!sessions.admin().current().is_logged_in());
    }

    #[test]
    fn test_failed_admin_login_leaves_user_session_alone() {
        let backend = MemoryStore::new();
        let sessions = sessions(&backend);
        accept_login(sessions.user(), payload("u1", 1, Role::User)).unwrap();
        let before = sessions.user().current();

        // HTTP succeeded, but the account is not an admin.
        let err = accept_admin_login(sessions.admin(), payload("u1-admin", 1, Role::User))
            .unwrap_err();
        assert_eq!(err.user_message(), NOT_AN_ADMIN);

        assert_eq!(sessions.user().current(), before);
        assert!(sessions.user().current().is_logged_in());
        assert_eq!(sessions.admin().current(), Session::empty());
        assert_eq!(self::sessions(&backend).admin().current(), Session::empty());
    }

    #[test]
    fn test_rejected_credentials_leave_user_session_alone() {
        let backend = MemoryStore::new();
        let sessions = sessions(&backend);
        accept_login(sessions.user(), payload("u1", 1, Role::User)).unwrap();

        let result = decode_response::<AuthPayload>(401, r#"{"message":"Invalid credentials"}"#)
            .and_then(|p| accept_admin_login(sessions.admin(), p));
        assert_eq!(result.unwrap_err().user_message(), "Invalid credentials");
        assert_eq!(sessions.user().current().token(), Some("u1"));
    }

    #[test]
    fn test_admin_login_commits_admin_session_only() {
        let backend = MemoryStore::new();
        let sessions = sessions(&backend);
        accept_admin_login(sessions.admin(), payload("a1", 2, Role::Admin)).unwrap();

        assert!(sessions.admin().current().is_admin());
        assert!(!sessions.user().current().is_logged_in());
    }

    #[test]
    fn test_admin_login_refuses_user_store() {
        let backend = MemoryStore::new();
        let sessions = sessions(&backend);
        assert!(accept_admin_login(sessions.user(), payload("a1", 2, Role::Admin)).is_err());
        assert!(!sessions.user().current().is_logged_in());
    }

    #[test]
    fn test_unauthorized_clears_only_that_store() {
        let backend = MemoryStore::new();
        let sessions = sessions(&backend);
        accept_login(sessions.user(), payload("u1", 1, Role::User)).unwrap();
        accept_admin_login(sessions.admin(), payload("a1", 2, Role::Admin)).unwrap();

        assert!(!handle_unauthorized(&ApiError::Network("down".into()), sessions.user()));
        assert!(sessions.user().current().is_logged_in());

        assert!(handle_unauthorized(&ApiError::Unauthorized, sessions.user()));
        assert!(!sessions.user().current().is_logged_in());
        assert!(sessions.admin().current().is_logged_in());
        assert!(!self::sessions(&backend).user().current().is_logged_in());
    }

    #[test]
    fn test_sign_out_then_reload_is_empty() {
        let backend = MemoryStore::new();
        let sessions = sessions(&backend);
        accept_login(sessions.user(), payload("tok", 3, Role::User)).unwrap();
        sign_out(sessions.user()).unwrap();
        sign_out(sessions.user()).unwrap();
        assert_eq!(self::sessions(&backend).user().current(), Session::empty());
    }

    #[test]
    fn test_accept_login_surfaces_storage_error() {
        let backend = MemoryStore::new();
        let sessions = sessions(&backend);
        backend.disable();
        let err = accept_login(sessions.user(), payload("tok", 3, Role::User)).unwrap_err();
        assert!(matches!(err, ApiError::Session(store::SessionError::Storage(_))));
        assert!(!sessions.user().current().is_logged_in());
    }
}
