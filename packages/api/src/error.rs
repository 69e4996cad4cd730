use std::collections::BTreeMap;

use store::SessionError;
use thiserror::Error;

/// Per-field validation messages returned by `/register`.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errors surfaced to pages by [`crate::ApiClient`] and the auth flows.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The server declined the request; `message` is shown to the user verbatim.
    #[error("{message}")]
    Rejected { message: String, errors: FieldErrors },
    /// An authenticated call answered 401: the session is no longer valid.
    #[error("your session has expired, please sign in again")]
    Unauthorized,
    /// An authenticated call was attempted without a session.
    #[error("please sign in to continue")]
    NotSignedIn,
    #[error("unexpected response from server: {0}")]
    Decode(String),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    pub fn rejected(message: impl Into<String>) -> Self {
        ApiError::Rejected {
            message: message.into(),
            errors: FieldErrors::new(),
        }
    }

    /// Field errors of a rejected registration, if any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Rejected { errors, .. } if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }

    /// Single-line message for a form banner.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, errors } => {
                let details: Vec<&str> = errors
                    .values()
                    .flat_map(|messages| messages.iter().map(String::as_str))
                    .collect();
                if details.is_empty() {
                    message.clone()
                } else {
                    format!("{message}: {}", details.join(" "))
                }
            }
            ApiError::Network(_) => "Could not reach the server. Please try again.".to_string(),
            ApiError::Session(SessionError::Storage(_)) => {
                "Could not save your session on this device. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_lists_field_errors() {
        let mut errors = FieldErrors::new();
        errors.insert("email".to_string(), vec!["The email has already been taken.".to_string()]);
        errors.insert(
            "password".to_string(),
            vec!["The password must be at least 8 characters.".to_string()],
        );
        let err = ApiError::Rejected {
            message: "The given data was invalid".to_string(),
            errors,
        };
        assert_eq!(
            err.user_message(),
            "The given data was invalid: The email has already been taken. The password must be at least 8 characters."
        );
        assert_eq!(err.field_errors().map(|e| e.len()), Some(2));
    }

    #[test]
    fn test_plain_rejection_is_verbatim() {
        let err = ApiError::rejected("Invalid credentials");
        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(err.field_errors().is_none());
    }

    #[test]
    fn test_storage_failure_does_not_claim_sign_in() {
        let err = ApiError::from(SessionError::Storage(store::StorageError::QuotaExceeded(
            "full".to_string(),
        )));
        let message = err.user_message();
        assert_eq!(message, "Could not save your session on this device. Please try again.");
        assert!(!message.contains("Signed in"));
    }
}
