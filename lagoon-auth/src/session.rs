//! Sessions and current-session management
//!
//! A session is the authenticated principal: the backend-assigned user id,
//! the profile data last fetched from the backend, the set of linked
//! provider ids, and the owned token manager. The core session struct is
//! defined as follows:
//!
//! | Field           | Type             | Description                                     |
//! | --------------- | ---------------- | ----------------------------------------------- |
//! | `user_id`       | `UserId`         | Backend-assigned identifier of the user.        |
//! | `email`         | `Option<String>` | Primary email, when the backend knows one.      |
//! | `display_name`  | `Option<String>` | Display name from the account profile.          |
//! | `provider_ids`  | `Vec<String>`    | Providers currently linked to the account.      |
//! | `token_manager` | `TokenManager`   | Refresh/access token pair for this session.     |
//! | `created_at`    | `DateTime`       | When the session was established locally.       |

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    backend::{AccountInfo, AuthBackend},
    error::{AuthError, Error},
    token::{TokenManager, TokenResponse},
};

/// A unique, stable identifier for a user, minted by the identity backend.
/// This value should be treated as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: &str) -> Self {
        UserId(id.to_string())
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The currently authenticated principal and its token state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The backend-assigned identifier of the authenticated user.
    pub user_id: UserId,

    /// Primary email, when the backend knows one.
    pub email: Option<String>,

    /// Display name from the account profile.
    pub display_name: Option<String>,

    /// Ids of the providers currently linked to this account.
    pub provider_ids: Vec<String>,

    /// The refresh/access token pair for this session.
    pub token_manager: TokenManager,

    /// When this session was established locally.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a fresh exchange response. The provider list
    /// stays empty until the first profile reload.
    pub fn from_token_response(response: &TokenResponse) -> Self {
        Self {
            user_id: UserId::new(&response.local_id),
            email: response.email.clone(),
            display_name: None,
            provider_ids: Vec::new(),
            token_manager: TokenManager::from_response(response),
            created_at: Utc::now(),
        }
    }

    pub fn has_provider(&self, provider_id: &str) -> bool {
        self.provider_ids.iter().any(|p| p == provider_id)
    }

    /// Current access token, refreshing through the backend when stale.
    pub async fn access_token<B: AuthBackend>(&mut self, backend: &B) -> Result<String, Error> {
        if self.token_manager.is_stale() {
            let response = backend
                .refresh_token(self.token_manager.refresh_token())
                .await?;
            self.token_manager.apply_refresh(&response);
        }
        Ok(self.token_manager.access_token().to_string())
    }

    /// Replace profile data with the backend's view of the account.
    ///
    /// The profile must belong to this session's user.
    pub fn apply_account_info(&mut self, info: &AccountInfo) -> Result<(), Error> {
        if info.local_id != self.user_id.as_str() {
            return Err(AuthError::UserMismatch.into());
        }
        self.email = info.email.clone();
        self.display_name = info.display_name.clone();
        self.provider_ids = info.provider_ids.clone();
        Ok(())
    }
}

/// Owner of the process-wide current session.
///
/// Injected into the exchange service rather than held as a module-level
/// singleton, so callers can substitute test doubles or run several
/// independent session scopes in one process.
#[async_trait]
pub trait SessionManager: Send + Sync + 'static {
    /// Build a session from an exchange response, make it current, and
    /// return it.
    async fn initialize_from_response(&self, response: &TokenResponse) -> Result<Session, Error>;

    /// Refresh a session's profile data from the backend.
    async fn reload(&self, session: &mut Session) -> Result<(), Error>;

    /// The current session, if any.
    async fn current_session(&self) -> Option<Session>;

    /// Drop the current session.
    async fn sign_out(&self);
}

/// Default implementation of [`SessionManager`] holding the current
/// session in memory.
pub struct DefaultSessionManager<B: AuthBackend> {
    backend: Arc<B>,
    current: RwLock<Option<Session>>,
}

impl<B: AuthBackend> DefaultSessionManager<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            current: RwLock::new(None),
        }
    }
}

#[async_trait]
impl<B: AuthBackend> SessionManager for DefaultSessionManager<B> {
    async fn initialize_from_response(&self, response: &TokenResponse) -> Result<Session, Error> {
        let mut session = Session::from_token_response(response);
        let info = self
            .backend
            .account_info(session.token_manager.access_token())
            .await?;
        session.apply_account_info(&info)?;
        *self.current.write().await = Some(session.clone());
        Ok(session)
    }

    async fn reload(&self, session: &mut Session) -> Result<(), Error> {
        let token = session.access_token(self.backend.as_ref()).await?;
        let info = self.backend.account_info(&token).await?;
        session.apply_account_info(&info)?;

        let mut current = self.current.write().await;
        if let Some(existing) = current.as_mut() {
            if existing.user_id == session.user_id {
                *existing = session.clone();
            }
        }
        Ok(())
    }

    async fn current_session(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    async fn sign_out(&self) {
        *self.current.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> TokenResponse {
        TokenResponse {
            local_id: "user-1".to_string(),
            id_token: "at-1".to_string(),
            refresh_token: "rt-1".to_string(),
            expires_in: Some(3600),
            email: Some("jane@example.com".to_string()),
            provider_id: None,
            temporary_proof: None,
            phone_number: None,
        }
    }

    #[test]
    fn test_user_id() {
        let user_id = UserId::new("user-1");
        assert_eq!(user_id.as_str(), "user-1");
        assert_eq!(user_id.to_string(), "user-1");

        let user_id_from_str = UserId::from("user-1");
        assert_eq!(user_id_from_str, user_id);
    }

    #[test]
    fn test_session_from_token_response() {
        let session = Session::from_token_response(&response());

        assert_eq!(session.user_id.as_str(), "user-1");
        assert_eq!(session.email.as_deref(), Some("jane@example.com"));
        assert!(session.provider_ids.is_empty());
        assert_eq!(session.token_manager.access_token(), "at-1");
        assert_eq!(session.token_manager.refresh_token(), "rt-1");
    }

    #[test]
    fn test_has_provider() {
        let mut session = Session::from_token_response(&response());
        session.provider_ids = vec!["password".to_string(), "phone".to_string()];

        assert!(session.has_provider("phone"));
        assert!(!session.has_provider("google.com"));
    }

    #[test]
    fn test_apply_account_info_rejects_other_user() {
        let mut session = Session::from_token_response(&response());
        let result = session.apply_account_info(&AccountInfo {
            local_id: "user-2".to_string(),
            email: None,
            display_name: None,
            provider_ids: vec![],
        });

        assert!(matches!(result, Err(Error::Auth(AuthError::UserMismatch))));
        assert_eq!(session.email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn test_apply_account_info_replaces_profile() {
        let mut session = Session::from_token_response(&response());
        session
            .apply_account_info(&AccountInfo {
                local_id: "user-1".to_string(),
                email: Some("jane@example.com".to_string()),
                display_name: Some("Jane".to_string()),
                provider_ids: vec!["password".to_string()],
            })
            .unwrap();

        assert_eq!(session.display_name.as_deref(), Some("Jane"));
        assert_eq!(session.provider_ids, vec!["password".to_string()]);
    }
}
