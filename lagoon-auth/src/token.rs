//! Token responses and the per-session token manager.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Token lifetime assumed when a response omits `expiresIn`.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// How long before expiry an access token is treated as stale.
const DEFAULT_REFRESH_LEEWAY_SECS: i64 = 30;

/// Response from a credential exchange.
///
/// Opaque to callers apart from field extraction: the phone provider
/// round-trips a temporary proof and phone number through this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Backend-assigned id of the authenticated user.
    pub local_id: String,

    /// Fresh access token.
    pub id_token: String,

    /// Fresh refresh token.
    pub refresh_token: String,

    /// Lifetime of the access token in seconds. The backend sends this as a
    /// string of digits; a bare number is tolerated.
    #[serde(default, deserialize_with = "de_opt_seconds")]
    pub expires_in: Option<i64>,

    #[serde(default)]
    pub email: Option<String>,

    /// Provider that satisfied the exchange, when the backend reports one.
    #[serde(default)]
    pub provider_id: Option<String>,

    /// Temporary proof issued by phone-number exchanges.
    #[serde(default)]
    pub temporary_proof: Option<String>,

    /// Phone number verified by the exchange.
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl TokenResponse {
    /// Lifetime granted by the backend, falling back to the documented
    /// default when the field is absent.
    pub fn lifetime(&self) -> Duration {
        Duration::seconds(self.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS))
    }
}

/// Response from the token-refresh endpoint.
///
/// Unlike the exchange endpoints, this one speaks snake_case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default, deserialize_with = "de_opt_seconds")]
    pub expires_in: Option<i64>,
}

fn de_opt_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Num(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
    }
}

fn default_refresh_leeway() -> Duration {
    Duration::seconds(DEFAULT_REFRESH_LEEWAY_SECS)
}

/// The refresh/access token pair owned by a session.
///
/// Updated in place as exchanges and refreshes complete; serializable so
/// callers can persist a session across restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenManager {
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
    #[serde(skip, default = "default_refresh_leeway")]
    refresh_leeway: Duration,
}

impl TokenManager {
    pub fn from_response(response: &TokenResponse) -> Self {
        Self {
            access_token: response.id_token.clone(),
            refresh_token: response.refresh_token.clone(),
            expires_at: Utc::now() + response.lifetime(),
            refresh_leeway: default_refresh_leeway(),
        }
    }

    /// Set how long before expiry the access token counts as stale.
    pub fn with_refresh_leeway(mut self, leeway: Duration) -> Self {
        self.refresh_leeway = leeway;
        self
    }

    /// Replace both tokens from an exchange response.
    pub fn update_from_response(&mut self, response: &TokenResponse) {
        self.access_token = response.id_token.clone();
        self.refresh_token = response.refresh_token.clone();
        self.expires_at = Utc::now() + response.lifetime();
    }

    /// Replace both tokens from a refresh response.
    pub fn apply_refresh(&mut self, response: &RefreshResponse) {
        self.access_token = response.access_token.clone();
        self.refresh_token = response.refresh_token.clone();
        self.expires_at = Utc::now()
            + Duration::seconds(response.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS));
    }

    /// Whether the access token is expired or about to expire.
    pub fn is_stale(&self) -> bool {
        Utc::now() + self.refresh_leeway >= self.expires_at
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}
