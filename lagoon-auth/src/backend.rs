use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    credential::PhoneCredential,
    error::Error,
    token::{RefreshResponse, TokenResponse},
};

/// Profile data returned by the backend's account lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub local_id: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Ids of every provider currently linked to the account.
    #[serde(default)]
    pub provider_ids: Vec<String>,
}

/// The identity backend consumed by the credential exchange.
///
/// Each exchange method covers both capabilities of a credential: pass
/// `None` as `link_token` to mint a brand-new session, or the current
/// access token to bind the provider to the account that token belongs to.
/// Implementations own transport and retry policy; errors come back
/// untouched.
#[async_trait]
pub trait AuthBackend: Send + Sync + 'static {
    /// Exchange email/password credentials for a token response.
    async fn exchange_password(
        &self,
        email: &str,
        password: &str,
        link_token: Option<&str>,
    ) -> Result<TokenResponse, Error>;

    /// Exchange an OAuth assertion for a token response.
    async fn exchange_oauth(
        &self,
        provider_id: &str,
        id_token: Option<&str>,
        access_token: Option<&str>,
        link_token: Option<&str>,
    ) -> Result<TokenResponse, Error>;

    /// Exchange a phone-number proof for a token response.
    async fn exchange_phone(
        &self,
        credential: &PhoneCredential,
        link_token: Option<&str>,
    ) -> Result<TokenResponse, Error>;

    /// Exchange a backend-minted custom token for a token response.
    async fn exchange_custom_token(
        &self,
        token: &str,
        link_token: Option<&str>,
    ) -> Result<TokenResponse, Error>;

    /// Trade a refresh token for a fresh access token.
    async fn refresh_token(&self, refresh_token: &str) -> Result<RefreshResponse, Error>;

    /// Look up the profile bound to an access token.
    async fn account_info(&self, access_token: &str) -> Result<AccountInfo, Error>;

    /// Detach a provider from the account and return the updated profile.
    async fn delete_provider(
        &self,
        access_token: &str,
        provider_id: &str,
    ) -> Result<AccountInfo, Error>;
}
