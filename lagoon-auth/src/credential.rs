//! Provider credentials and their exchange capabilities.

use crate::{backend::AuthBackend, error::Error, token::TokenResponse};

/// Provider id of the email/password provider.
pub const PASSWORD_PROVIDER_ID: &str = "password";

/// Provider id of the phone-number provider.
pub const PHONE_PROVIDER_ID: &str = "phone";

/// Provider id used for backend-minted custom tokens.
pub const CUSTOM_TOKEN_PROVIDER_ID: &str = "custom";

/// Proof of identity for a single provider.
///
/// A credential is immutable once constructed and exposes two capabilities:
/// exchanging itself for a new session token, or for a token bound to an
/// existing session. New providers are added as new variants; the exchange
/// service never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCredential {
    /// Email/password credentials.
    Password { email: String, password: String },

    /// Tokens obtained from an OAuth provider (e.g. `google.com`).
    OAuth {
        provider_id: String,
        id_token: Option<String>,
        access_token: Option<String>,
    },

    /// A phone-number proof, user-entered or round-tripped from the backend.
    Phone(PhoneCredential),

    /// A custom token minted by an application backend.
    CustomToken { token: String },
}

/// The two forms a phone-number proof can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneCredential {
    /// A verification code the user received out of band.
    Verification {
        verification_id: String,
        code: String,
    },

    /// A temporary proof issued by the backend during a previous exchange.
    TemporaryProof { proof: String, phone_number: String },
}

impl AuthCredential {
    pub fn password(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Password {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn oauth(
        provider_id: impl Into<String>,
        id_token: Option<String>,
        access_token: Option<String>,
    ) -> Self {
        Self::OAuth {
            provider_id: provider_id.into(),
            id_token,
            access_token,
        }
    }

    pub fn phone_verification(
        verification_id: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self::Phone(PhoneCredential::Verification {
            verification_id: verification_id.into(),
            code: code.into(),
        })
    }

    pub fn phone_proof(proof: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self::Phone(PhoneCredential::TemporaryProof {
            proof: proof.into(),
            phone_number: phone_number.into(),
        })
    }

    pub fn custom_token(token: impl Into<String>) -> Self {
        Self::CustomToken {
            token: token.into(),
        }
    }

    /// Id of the provider this credential proves identity for.
    pub fn provider_id(&self) -> &str {
        match self {
            AuthCredential::Password { .. } => PASSWORD_PROVIDER_ID,
            AuthCredential::OAuth { provider_id, .. } => provider_id,
            AuthCredential::Phone(_) => PHONE_PROVIDER_ID,
            AuthCredential::CustomToken { .. } => CUSTOM_TOKEN_PROVIDER_ID,
        }
    }

    /// Exchange this credential for a brand-new session token.
    pub async fn exchange<B: AuthBackend>(&self, backend: &B) -> Result<TokenResponse, Error> {
        self.dispatch(backend, None).await
    }

    /// Exchange this credential for a token bound to the session that
    /// `link_token` belongs to.
    pub async fn link_to_token<B: AuthBackend>(
        &self,
        backend: &B,
        link_token: &str,
    ) -> Result<TokenResponse, Error> {
        self.dispatch(backend, Some(link_token)).await
    }

    async fn dispatch<B: AuthBackend>(
        &self,
        backend: &B,
        link_token: Option<&str>,
    ) -> Result<TokenResponse, Error> {
        match self {
            AuthCredential::Password { email, password } => {
                backend.exchange_password(email, password, link_token).await
            }
            AuthCredential::OAuth {
                provider_id,
                id_token,
                access_token,
            } => {
                backend
                    .exchange_oauth(
                        provider_id,
                        id_token.as_deref(),
                        access_token.as_deref(),
                        link_token,
                    )
                    .await
            }
            AuthCredential::Phone(phone) => backend.exchange_phone(phone, link_token).await,
            AuthCredential::CustomToken { token } => {
                backend.exchange_custom_token(token, link_token).await
            }
        }
    }
}
