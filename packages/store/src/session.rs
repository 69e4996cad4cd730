//! # SessionStore - the single owner of a session
//!
//! A [`SessionStore`] holds the in-memory [`Session`] for one [`SessionKind`]
//! and mirrors it into a [`KeyValueStore`]. The in-memory copy is the source
//! of truth; the mirror is rebuilt into memory by [`SessionStore::load`] on
//! start-up and rewritten by every [`SessionStore::commit`] and
//! [`SessionStore::clear`].
//!
//! ## Mutation and notification
//!
//! `commit` and `clear` are the only mutators. Each publishes the new session
//! to subscribers exactly once, after the durable write (or erase) returned.
//! A page reload right after a notification therefore reconstructs what the
//! subscribers were shown.
//!
//! ## Storage failure
//!
//! The first failed write makes `commit` return [`SessionError::Storage`] with
//! the previous state untouched. From then on the store is *degraded*: it keeps
//! sessions in memory only for the rest of the process. The one-time warning
//! goes to [`SessionStore::on_storage_warning`] listeners as it happens, or is
//! held for [`SessionStore::take_storage_warning`] when nobody is listening.
//!
//! A degraded store still erases the stored pair on `clear` and on every
//! memory-only `commit`, so a reload never brings back a session the user
//! logged out of or replaced.
//!
//! ## Corruption
//!
//! A mirror holding a token without a user, a user without a token, or a user
//! record that does not parse is discarded wholesale on `load` and reads as
//! logged out. It is never repaired field by field.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use thiserror::Error;

use crate::config::ClientConfig;
use crate::models::{Role, Session, SessionKind, StorageKeys, UserProfile};
use crate::storage::{KeyValueStore, StorageError};
use crate::subscribers::{Subscribers, Subscription};

pub const STORAGE_WARNING: &str = "Your session may not persist across reloads.";

/// Errors returned by [`SessionStore`] mutators.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The token or profile handed to `commit` is not a usable session.
    #[error("invalid session: {0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Why a persisted session was thrown away. Logged, never returned.
#[derive(Debug, Error)]
enum CorruptSession {
    #[error("token stored without a user record")]
    TokenWithoutUser,
    #[error("user record stored without a token")]
    UserWithoutToken,
    #[error("user record does not parse: {0}")]
    Unparseable(String),
    #[error("{0}")]
    Invalid(String),
}

enum ReadFailure {
    Corrupt(CorruptSession),
    Storage(StorageError),
}

impl From<StorageError> for ReadFailure {
    fn from(e: StorageError) -> Self {
        ReadFailure::Storage(e)
    }
}

struct Inner {
    kind: SessionKind,
    keys: StorageKeys,
    backend: Box<dyn KeyValueStore>,
    current: RefCell<Session>,
    persistent: Cell<bool>,
    warning_pending: Cell<bool>,
    subscribers: Subscribers<Session>,
    warning_listeners: Subscribers<&'static str>,
}

/// Authoritative session holder for one [`SessionKind`].
///
/// Cloning is cheap and every clone refers to the same session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<Inner>,
}

impl SessionStore {
    /// Create a store over `backend`. The in-memory session starts empty;
    /// call [`SessionStore::load`] to pick up a persisted one.
    pub fn new(
        kind: SessionKind,
        backend: impl KeyValueStore + 'static,
        config: &ClientConfig,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                kind,
                keys: StorageKeys::for_kind(&config.storage.prefix, kind),
                backend: Box::new(backend),
                current: RefCell::new(Session::empty()),
                persistent: Cell::new(true),
                warning_pending: Cell::new(false),
                subscribers: Subscribers::new(),
                warning_listeners: Subscribers::new(),
            }),
        }
    }

    pub fn kind(&self) -> SessionKind {
        self.inner.kind
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.inner.keys
    }

    /// `false` once a storage failure switched the store to memory-only.
    pub fn is_persistent(&self) -> bool {
        self.inner.persistent.get()
    }

    /// Rebuild the in-memory session from durable storage.
    ///
    /// Missing or corrupt data yields the empty session and erases whatever was
    /// partially stored. Subscribers hear about it only if the session changed.
    pub fn load(&self) -> Session {
        if !self.is_persistent() {
            return self.current();
        }

        let loaded = match self.read_persisted() {
            Ok(session) => session,
            Err(ReadFailure::Corrupt(reason)) => {
                tracing::warn!(kind = %self.inner.kind, %reason, "discarding corrupt session");
                if let Err(e) = self.erase_persisted() {
                    self.degrade(&e);
                }
                Session::empty()
            }
            Err(ReadFailure::Storage(e)) => {
                self.degrade(&e);
                Session::empty()
            }
        };

        let changed = *self.inner.current.borrow() != loaded;
        if changed {
            self.replace(loaded.clone());
        }
        loaded
    }

    /// Replace the session with `token` + `user` and persist both.
    ///
    /// On error nothing changes and subscribers are not notified.
    pub fn commit(
        &self,
        token: impl Into<String>,
        user: UserProfile,
    ) -> Result<Session, SessionError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SessionError::Validation("token is empty".to_string()));
        }
        validate_profile(&user).map_err(SessionError::Validation)?;

        if self.is_persistent() {
            if let Err(e) = self.persist(&token, &user) {
                self.degrade(&e);
                return Err(e.into());
            }
        } else if let Err(e) = self.erase_persisted() {
            // The stored pair is now stale; a reload must not restore it.
            tracing::warn!(kind = %self.inner.kind, error = %e, "could not erase superseded session");
        }

        let session = Session::new(token, user);
        tracing::debug!(kind = %self.inner.kind, persistent = self.is_persistent(), "session committed");
        self.replace(session.clone());
        Ok(session)
    }

    /// Log out: erase the mirror and reset to the empty session.
    ///
    /// The in-memory session is always reset and the erase is attempted even on
    /// a degraded store. The first failed erase of a persistent store is
    /// returned so the caller can warn that the logout may not survive a
    /// reload; on a degraded store it is only logged.
    pub fn clear(&self) -> Result<(), SessionError> {
        let result = match self.erase_persisted() {
            Ok(()) => Ok(()),
            Err(e) if self.is_persistent() => {
                self.degrade(&e);
                Err(e.into())
            }
            Err(e) => {
                tracing::warn!(kind = %self.inner.kind, error = %e, "could not erase stored session");
                Ok(())
            }
        };
        tracing::debug!(kind = %self.inner.kind, "session cleared");
        self.replace(Session::empty());
        result
    }

    /// The in-memory session. Never touches storage.
    pub fn current(&self) -> Session {
        self.inner.current.borrow().clone()
    }

    /// Call `callback` with the new session after every `commit` and `clear`.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&Session) + 'static) -> Subscription {
        self.inner.subscribers.subscribe(callback)
    }

    /// Call `callback` with the warning at the moment the store degrades.
    ///
    /// A warning delivered here is not also returned by
    /// [`SessionStore::take_storage_warning`].
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn on_storage_warning(&self, callback: impl Fn(&'static str) + 'static) -> Subscription {
        self.inner
            .warning_listeners
            .subscribe(move |message: &&'static str| callback(*message))
    }

    /// Number of live [`SessionStore::subscribe`] registrations.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }

    /// The degraded-storage warning, returned once after the store degraded
    /// while no [`SessionStore::on_storage_warning`] listener was registered.
    pub fn take_storage_warning(&self) -> Option<&'static str> {
        self.inner
            .warning_pending
            .replace(false)
            .then_some(STORAGE_WARNING)
    }

    fn replace(&self, session: Session) {
        *self.inner.current.borrow_mut() = session.clone();
        self.inner.subscribers.publish(&session);
    }

    fn read_persisted(&self) -> Result<Session, ReadFailure> {
        let keys = &self.inner.keys;
        let token = self.inner.backend.get(&keys.token)?;
        let user = self.inner.backend.get(&keys.user)?;

        let (token, user) = match (token, user) {
            (None, None) => return Ok(Session::empty()),
            (Some(_), None) => return Err(ReadFailure::Corrupt(CorruptSession::TokenWithoutUser)),
            (None, Some(_)) => return Err(ReadFailure::Corrupt(CorruptSession::UserWithoutToken)),
            (Some(token), Some(user)) => (token, user),
        };
        if token.trim().is_empty() {
            return Err(ReadFailure::Corrupt(CorruptSession::Invalid(
                "stored token is empty".to_string(),
            )));
        }
        let profile: UserProfile = serde_json::from_str(&user)
            .map_err(|e| ReadFailure::Corrupt(CorruptSession::Unparseable(e.to_string())))?;
        validate_profile(&profile)
            .map_err(|reason| ReadFailure::Corrupt(CorruptSession::Invalid(reason)))?;

        Ok(Session::new(token, profile))
    }

    /// Write user then token; if the token write fails, put the old user back.
    fn persist(&self, token: &str, user: &UserProfile) -> Result<(), StorageError> {
        let keys = &self.inner.keys;
        let backend = &self.inner.backend;
        let record = serde_json::to_string(user)?;

        let previous_user = backend.get(&keys.user)?;
        backend.set(&keys.user, &record)?;
        if let Err(e) = backend.set(&keys.token, token) {
            let rollback = match previous_user {
                Some(previous) => backend.set(&keys.user, &previous),
                None => backend.remove(&keys.user),
            };
            if let Err(rollback_err) = rollback {
                tracing::warn!(kind = %self.inner.kind, error = %rollback_err, "could not roll back user record");
            }
            return Err(e);
        }
        Ok(())
    }

    /// Remove both keys. Either removal alone already makes `load` read empty,
    /// so the second is attempted even when the first fails.
    fn erase_persisted(&self) -> Result<(), StorageError> {
        let keys = &self.inner.keys;
        let token = self.inner.backend.remove(&keys.token);
        let user = self.inner.backend.remove(&keys.user);
        token.and(user)
    }

    fn degrade(&self, error: &StorageError) {
        if self.inner.persistent.replace(false) {
            tracing::warn!(kind = %self.inner.kind, %error, "session storage failed, keeping session in memory only");
            if self.inner.warning_listeners.is_empty() {
                self.inner.warning_pending.set(true);
            } else {
                self.inner.warning_listeners.publish(&STORAGE_WARNING);
            }
        }
    }
}

impl PartialEq for SessionStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("kind", &self.inner.kind)
            .field("persistent", &self.is_persistent())
            .field("logged_in", &self.inner.current.borrow().is_logged_in())
            .finish()
    }
}

fn validate_profile(user: &UserProfile) -> Result<(), String> {
    if user.id == 0 {
        return Err("user id is missing".to_string());
    }
    if let Role::Other(role) = &user.role {
        if role.trim().is_empty() {
            return Err("user role is missing".to_string());
        }
    }
    Ok(())
}

/// The regular-user and back-office sessions of one client.
///
/// Both share a backend but use disjoint keys, so each can be logged in or
/// out without affecting the other.
#[derive(Clone, Debug, PartialEq)]
pub struct Sessions {
    user: SessionStore,
    admin: SessionStore,
}

impl Sessions {
    /// Build both stores over `backend` and load them, so the first render
    /// already sees the persisted sessions.
    pub fn open<B>(backend: B, config: &ClientConfig) -> Self
    where
        B: KeyValueStore + Clone + 'static,
    {
        let sessions = Self {
            user: SessionStore::new(SessionKind::User, backend.clone(), config),
            admin: SessionStore::new(SessionKind::Admin, backend, config),
        };
        sessions.user.load();
        sessions.admin.load();
        sessions
    }

    pub fn user(&self) -> &SessionStore {
        &self.user
    }

    pub fn admin(&self) -> &SessionStore {
        &self.admin
    }

    pub fn get(&self, kind: SessionKind) -> &SessionStore {
        match kind {
            SessionKind::User => &self.user,
            SessionKind::Admin => &self.admin,
        }
    }
}
