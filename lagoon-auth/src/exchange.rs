//! Credential exchange: sign-in, linking, and reauthentication.
//!
//! The exchange service turns a provider credential into either a new
//! session or an additional provider binding on an existing session. It
//! owns the cross-request invariants (no duplicate provider links, token
//! consistency after mutation) and delegates everything else: transport to
//! the [`AuthBackend`], current-session ownership to the
//! [`SessionManager`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    backend::AuthBackend,
    credential::{AuthCredential, PhoneCredential},
    error::{AuthError, Error},
    session::{Session, SessionManager},
    token::TokenResponse,
};

/// What kind of exchange produced a [`SessionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    SignIn,
    Link,
    Reauthenticate,
}

/// The outcome of a successful credential exchange.
///
/// Pairs a snapshot of the session with the credential the operation
/// resolved to and the operation tag. For linking, the credential is the
/// one derived from the backend response, not the caller's input, and may
/// be absent: only the phone provider round-trips a credential.
#[derive(Debug, Clone)]
pub struct SessionResult {
    pub session: Session,
    pub credential: Option<AuthCredential>,
    pub operation: OperationType,
}

/// Service that turns credentials into sessions and provider links.
pub struct CredentialExchange<B: AuthBackend, M: SessionManager> {
    backend: Arc<B>,
    sessions: Arc<M>,
}

impl<B, M> CredentialExchange<B, M>
where
    B: AuthBackend,
    M: SessionManager,
{
    pub fn new(backend: Arc<B>, sessions: Arc<M>) -> Self {
        Self { backend, sessions }
    }

    /// Exchange a credential for a new session, replacing the current one.
    ///
    /// Exchange failures propagate untouched; nothing is retried here.
    pub async fn sign_in_with_credential(
        &self,
        credential: AuthCredential,
    ) -> Result<SessionResult, Error> {
        let response = credential.exchange(self.backend.as_ref()).await?;
        let session = self.sessions.initialize_from_response(&response).await?;

        tracing::info!(
            user.id = %session.user_id,
            provider = credential.provider_id(),
            "Signed in with credential",
        );

        Ok(SessionResult {
            session,
            credential: Some(credential),
            operation: OperationType::SignIn,
        })
    }

    /// Bind an additional provider to an authenticated session.
    ///
    /// A credential whose provider is already linked is rejected before any
    /// backend call. After a successful exchange the session's tokens are
    /// replaced in place and the profile is reloaded; nothing is rolled
    /// back, so a reload failure leaves the session holding the new token
    /// pair and the pre-link provider list. Callers needing atomicity must
    /// snapshot the session themselves, and concurrent link calls for the
    /// same session are not serialized here.
    pub async fn link_with_credential(
        &self,
        session: &mut Session,
        credential: AuthCredential,
    ) -> Result<SessionResult, Error> {
        let provider_id = credential.provider_id().to_string();
        if session.has_provider(&provider_id) {
            return Err(AuthError::ProviderAlreadyLinked(provider_id).into());
        }

        let token = session.access_token(self.backend.as_ref()).await?;
        let response = credential
            .link_to_token(self.backend.as_ref(), &token)
            .await?;
        let linked = credential_from_token_response(&response);
        session.token_manager.update_from_response(&response);
        self.sessions.reload(session).await?;

        tracing::info!(
            user.id = %session.user_id,
            provider = %provider_id,
            "Linked provider to account",
        );

        Ok(SessionResult {
            session: session.clone(),
            credential: linked,
            operation: OperationType::Link,
        })
    }

    /// Re-verify the session owner's identity with a fresh credential.
    ///
    /// The exchange must resolve to the same user the session belongs to;
    /// on success the session's tokens are replaced in place.
    pub async fn reauthenticate_with_credential(
        &self,
        session: &mut Session,
        credential: AuthCredential,
    ) -> Result<SessionResult, Error> {
        let response = credential.exchange(self.backend.as_ref()).await?;
        if response.local_id != session.user_id.as_str() {
            return Err(AuthError::UserMismatch.into());
        }
        session.token_manager.update_from_response(&response);

        tracing::debug!(user.id = %session.user_id, "Reauthenticated session");

        Ok(SessionResult {
            session: session.clone(),
            credential: Some(credential),
            operation: OperationType::Reauthenticate,
        })
    }

    /// Detach a linked provider from the session's account.
    pub async fn unlink_provider(
        &self,
        session: &mut Session,
        provider_id: &str,
    ) -> Result<Session, Error> {
        if !session.has_provider(provider_id) {
            return Err(AuthError::ProviderNotLinked(provider_id.to_string()).into());
        }

        let token = session.access_token(self.backend.as_ref()).await?;
        let info = self.backend.delete_provider(&token, provider_id).await?;
        session.apply_account_info(&info)?;

        tracing::info!(
            user.id = %session.user_id,
            provider = %provider_id,
            "Unlinked provider from account",
        );

        Ok(session.clone())
    }
}

/// Reconstruct a provider credential from an exchange response.
///
/// Only the phone provider round-trips this way: the backend hands back a
/// temporary proof together with the phone number it verified. Every other
/// response yields `None`, and callers must not assume a credential is
/// recoverable.
pub fn credential_from_token_response(response: &TokenResponse) -> Option<AuthCredential> {
    match (&response.temporary_proof, &response.phone_number) {
        (Some(proof), Some(number)) => {
            Some(AuthCredential::Phone(PhoneCredential::TemporaryProof {
                proof: proof.clone(),
                phone_number: number.clone(),
            }))
        }
        _ => None,
    }
}
