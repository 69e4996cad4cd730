//! HTTP client for the wellness REST API.
//!
//! Responses are read as text and decoded by [`decode_response`], so status
//! handling can be exercised without a server.

use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{ClientConfig, Session};

use crate::error::ApiError;
use crate::models::{AuthPayload, Credentials, ErrorBody, Registration};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
    }
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        self.post_public("/login", credentials).await
    }

    pub async fn register(&self, registration: &Registration) -> Result<AuthPayload, ApiError> {
        self.post_public("/register", registration).await
    }

    /// The caller still has to check the returned role; see [`crate::auth::accept_admin_login`].
    pub async fn admin_login(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        self.post_public("/admin/login", credentials).await
    }

    /// `GET` with the session's bearer token.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        session: &Session,
    ) -> Result<T, ApiError> {
        let request = authorize(self.http.get(self.url(path)), session)?;
        let (status, body) = execute(request).await?;
        decode_authorized_response(status, &body)
    }

    /// `POST` a JSON body with the session's bearer token.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        session: &Session,
    ) -> Result<T, ApiError> {
        let request = authorize(self.http.post(self.url(path)).json(body), session)?;
        let (status, body) = execute(request).await?;
        decode_authorized_response(status, &body)
    }

    /// `DELETE` with the session's bearer token, ignoring any response body.
    pub async fn delete(&self, path: &str, session: &Session) -> Result<(), ApiError> {
        let request = authorize(self.http.delete(self.url(path)), session)?;
        let (status, body) = execute(request).await?;
        decode_authorized_response::<serde_json::Value>(status, &body).map(|_| ())
    }

    async fn post_public<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let (status, text) = execute(self.http.post(self.url(path)).json(body)).await?;
        decode_response(status, &text)
    }
}

fn authorize(
    request: reqwest::RequestBuilder,
    session: &Session,
) -> Result<reqwest::RequestBuilder, ApiError> {
    let token = session.token().ok_or(ApiError::NotSignedIn)?;
    Ok(request.bearer_auth(token))
}

async fn execute(request: reqwest::RequestBuilder) -> Result<(u16, String), ApiError> {
    let response = request.send().await.map_err(|e| {
        tracing::error!(error = %e, "API request failed");
        ApiError::Network(e.to_string())
    })?;
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    Ok((status, body))
}

/// Decode a response to an unauthenticated call.
///
/// 2xx bodies decode into `T` (an empty body decodes as JSON `null`); any
/// other status becomes [`ApiError::Rejected`] with the server's message.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if (200..300).contains(&status) {
        let body = if body.trim().is_empty() { "null" } else { body };
        return serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()));
    }

    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status {status}"));
    tracing::debug!(status, %message, "API rejected request");
    Err(ApiError::Rejected {
        message,
        errors: parsed.errors,
    })
}

/// Like [`decode_response`], but a 401 means the bearer token is no longer valid.
pub fn decode_authorized_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<T, ApiError> {
    if status == 401 {
        tracing::warn!("API answered 401 to an authenticated call");
        return Err(ApiError::Unauthorized);
    }
    decode_response(status, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::Role;

    #[test]
    fn test_decode_login_success() {
        let body = r#"{"token":"tok123","user":{"id":5,"name":"A","email":"a@b.com","role":"user"}}"#;
        let payload: AuthPayload = decode_response(200, body).unwrap();
        assert_eq!(payload.token, "tok123");
        assert_eq!(payload.user.id, 5);
        assert_eq!(payload.user.role, Role::User);
        assert_eq!(payload.user.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_decode_login_failure_message() {
        let err = decode_response::<AuthPayload>(401, r#"{"message":"Invalid credentials"}"#)
            .unwrap_err();
        match err {
            ApiError::Rejected { message, errors } => {
                assert_eq!(message, "Invalid credentials");
                assert!(errors.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_register_field_errors() {
        let body = r#"{"message":"The given data was invalid.","errors":{"email":["The email has already been taken."]}}"#;
        let err = decode_response::<AuthPayload>(422, body).unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors["email"], vec!["The email has already been taken.".to_string()]);
    }

    #[test]
    fn test_decode_non_json_failure() {
        let err = decode_response::<AuthPayload>(500, "<html>oops</html>").unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status 500");
    }

    #[test]
    fn test_decode_success_without_user_is_decode_error() {
        let err = decode_response::<AuthPayload>(200, r#"{"token":"t"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_authorized_401_is_unauthorized() {
        let err = decode_authorized_response::<serde_json::Value>(401, r#"{"message":"Unauthenticated."}"#)
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn test_empty_success_body_decodes_as_unit() {
        decode_authorized_response::<()>(204, "").unwrap();
    }

    #[test]
    fn test_authenticated_call_requires_session() {
        let client = ApiClient::new(&ClientConfig::default());
        let request = client.http.get(client.url("/posts"));
        assert!(matches!(
            authorize(request, &Session::empty()),
            Err(ApiError::NotSignedIn)
        ));
    }

    #[test]
    fn test_url_joins_paths() {
        let client = ApiClient::new(&ClientConfig::default().with_base_url("https://x.test/api/"));
        assert_eq!(client.url("/login"), "https://x.test/api/login");
        assert_eq!(client.url("admin/login"), "https://x.test/api/admin/login");
    }
}
