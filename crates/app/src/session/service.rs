//! Session/auth service.
//!
//! Talks to the backend's auth endpoints for credential flows and keeps the
//! current session in an explicit, constructor-injected store. Nothing here
//! is a trust boundary; the backend enforces authorization per request.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use jiff::{Timestamp, ToSpan as _};
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::{
    gateway::{Filter, Gateway, GatewayConfig, GatewayError, Query, TokenSource},
    session::{
        models::{Session, UserProfile},
        token::AccessToken,
    },
};

/// Errors surfaced by the auth service.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// The auth endpoint could not be reached or decoded.
    #[error("transport error")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the credentials or request.
    #[error("authentication rejected: {0}")]
    Rejected(String),

    /// The operation requires a signed-in session.
    #[error("not signed in")]
    NotSignedIn,

    /// A profile read through the gateway failed.
    #[error("gateway error")]
    Gateway(#[source] GatewayError),

    /// The profile row did not match the expected shape.
    #[error("malformed profile row")]
    Decode(#[source] serde_json::Error),
}

impl From<GatewayError> for AuthServiceError {
    fn from(error: GatewayError) -> Self {
        Self::Gateway(error)
    }
}

/// Holds the current session for one running application.
///
/// Created at application start and handed to every collaborator that needs
/// the bearer token; there is no ambient singleton.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Creates an empty (signed-out) store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current session, if signed in.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.inner.read().ok().and_then(|guard| guard.clone())
    }

    /// The signed-in user's id, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<Uuid> {
        self.current().map(|session| session.user_id)
    }

    pub(crate) fn set(&self, session: Session) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = Some(session);
        }
    }

    pub(crate) fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = None;
        }
    }
}

impl TokenSource for SessionStore {
    fn access_token(&self) -> Option<AccessToken> {
        self.current().map(|session| session.access_token)
    }
}

/// Credential and profile flows.
#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Registers a new account.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<(), AuthServiceError>;

    /// Exchanges credentials for a session and stores it.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthServiceError>;

    /// Mints a fresh session from the stored refresh token.
    async fn refresh(&self) -> Result<Session, AuthServiceError>;

    /// Revokes the session server-side and clears the store.
    async fn sign_out(&self) -> Result<(), AuthServiceError>;

    /// Fetches the signed-in user's profile row.
    async fn current_profile(&self) -> Result<UserProfile, AuthServiceError>;
}

/// HTTP implementation of [`AuthService`].
pub struct RestAuthService {
    config: GatewayConfig,
    http: Client,
    store: Arc<SessionStore>,
    gateway: Arc<dyn Gateway>,
}

impl std::fmt::Debug for RestAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestAuthService")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl RestAuthService {
    #[must_use]
    pub fn new(config: GatewayConfig, store: Arc<SessionStore>, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            config,
            http: Client::new(),
            store,
            gateway,
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.config.base_url)
    }

    async fn token_request(
        &self,
        grant_type: &str,
        body: serde_json::Value,
    ) -> Result<Session, AuthServiceError> {
        let response = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.config.anon_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let granted: TokenResponse = response.json().await?;
        let session = granted.into_session();

        self.store.set(session.clone());

        Ok(session)
    }
}

#[async_trait]
impl AuthService for RestAuthService {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<(), AuthServiceError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "data": { "full_name": full_name },
        });

        let response = self
            .http
            .post(self.auth_url("signup"))
            .header("apikey", &self.config.anon_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthServiceError> {
        let session = self
            .token_request(
                "password",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await?;

        info!(user_id = %session.user_id, "signed in");

        Ok(session)
    }

    async fn refresh(&self) -> Result<Session, AuthServiceError> {
        let current = self.store.current().ok_or(AuthServiceError::NotSignedIn)?;

        self.token_request(
            "refresh_token",
            serde_json::json!({ "refresh_token": current.refresh_token.reveal() }),
        )
        .await
    }

    async fn sign_out(&self) -> Result<(), AuthServiceError> {
        let current = self.store.current().ok_or(AuthServiceError::NotSignedIn)?;

        let response = self
            .http
            .post(self.auth_url("logout"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(current.access_token.reveal())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        self.store.clear();

        Ok(())
    }

    async fn current_profile(&self) -> Result<UserProfile, AuthServiceError> {
        let user_id = self.store.user_id().ok_or(AuthServiceError::NotSignedIn)?;

        let row = self
            .gateway
            .select_one("users", Query::new().filter(Filter::eq("id", user_id)))
            .await?;

        serde_json::from_value(row).map_err(AuthServiceError::Decode)
    }
}

async fn rejection(response: reqwest::Response) -> AuthServiceError {
    #[derive(Debug, Default, Deserialize)]
    struct AuthErrorBody {
        error_description: Option<String>,
        msg: Option<String>,
        error: Option<String>,
    }

    let body: AuthErrorBody = response.json().await.unwrap_or_default();

    let message = body
        .error_description
        .or(body.msg)
        .or(body.error)
        .unwrap_or_else(|| "Request failed".to_owned());

    AuthServiceError::Rejected(message)
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: Uuid,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        let lifetime = self
            .expires_in
            .clamp(0, i64::from(i32::MAX))
            .seconds();

        // A lifetime past the representable range pins expiry to the far end.
        let expires_at = Timestamp::now()
            .checked_add(lifetime)
            .unwrap_or(Timestamp::MAX);

        Session {
            access_token: AccessToken::new(self.access_token),
            refresh_token: AccessToken::new(self.refresh_token),
            expires_at,
            user_id: self.user.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_yields_no_token() {
        let store = SessionStore::new();

        assert!(store.access_token().is_none());
        assert!(store.user_id().is_none());
    }

    #[test]
    fn stored_session_is_visible_to_the_token_source() {
        let store = SessionStore::new();
        let user_id = Uuid::new_v4();

        store.set(Session {
            access_token: AccessToken::new("access".to_owned()),
            refresh_token: AccessToken::new("refresh".to_owned()),
            expires_at: Timestamp::now(),
            user_id,
        });

        assert_eq!(store.user_id(), Some(user_id));
        assert_eq!(
            store.access_token().map(|token| token.reveal()),
            Some("access".to_owned())
        );

        store.clear();

        assert!(store.access_token().is_none());
    }

    #[test]
    fn token_response_becomes_a_session() {
        let granted: TokenResponse = serde_json::from_value(serde_json::json!({
            "access_token": "at",
            "refresh_token": "rt",
            "expires_in": 3600,
            "user": { "id": Uuid::nil() },
        }))
        .expect("token response should deserialize");

        let before = Timestamp::now();
        let session = granted.into_session();

        assert_eq!(session.user_id, Uuid::nil());
        assert_eq!(session.access_token.reveal(), "at");
        assert!(session.expires_at > before, "expiry must be in the future");
    }

    #[test]
    fn oversized_expiry_stays_in_range() {
        let granted: TokenResponse = serde_json::from_value(serde_json::json!({
            "access_token": "at",
            "refresh_token": "rt",
            "expires_in": i64::MAX,
            "user": { "id": Uuid::nil() },
        }))
        .expect("token response should deserialize");

        let session = granted.into_session();

        assert!(session.expires_at > Timestamp::now());
    }
}
