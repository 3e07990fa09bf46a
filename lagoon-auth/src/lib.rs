//! Credential exchange and session management for the lagoon client SDK
//!
//! This crate owns two tightly related jobs of the identity layer:
//! exchanging proof-of-identity credentials for session tokens, and
//! attaching additional identity providers to an already-authenticated
//! account.
//!
//! The pieces fit together as follows: an [`AuthCredential`] carries the
//! proof material for one provider and knows how to exchange itself
//! against an [`AuthBackend`]; a [`Session`] owns the resulting
//! refresh/access token pair through its [`TokenManager`]; the
//! [`CredentialExchange`] service drives sign-in, linking,
//! reauthentication, and unlinking, delegating current-session ownership
//! to a [`SessionManager`].
//!
//! Transport, retry policy, and cryptographic token verification are the
//! backend's problem; this crate surfaces backend failures verbatim.

pub mod backend;
pub mod credential;
pub mod error;
pub mod exchange;
pub mod session;
pub mod token;

pub use backend::{AccountInfo, AuthBackend};
pub use credential::{AuthCredential, PhoneCredential};
pub use error::Error;
pub use exchange::{
    CredentialExchange, OperationType, SessionResult, credential_from_token_response,
};
pub use session::{DefaultSessionManager, Session, SessionManager, UserId};
pub use token::{RefreshResponse, TokenManager, TokenResponse};
