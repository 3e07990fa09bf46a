use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Exchange error: {0}")]
    Exchange(#[from] ExchangeError),
}

/// Failures raised locally, before or instead of a backend mutation.
///
/// These are recoverable by the caller: when one is returned, no session
/// state has been changed by the failing operation.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Provider {0} is already linked to this account")]
    ProviderAlreadyLinked(String),

    #[error("Provider {0} is not linked to this account")]
    ProviderNotLinked(String),

    #[error("Credential resolves to a different user")]
    UserMismatch,
}

/// Failures surfaced by the identity backend, passed through verbatim.
///
/// The exchange layer is a boundary, not a retry point.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl Error {
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    pub fn is_exchange_error(&self) -> bool {
        matches!(self, Error::Exchange(_))
    }

    /// True when linking failed because the provider was already bound.
    pub fn is_already_linked(&self) -> bool {
        matches!(self, Error::Auth(AuthError::ProviderAlreadyLinked(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let already_linked = Error::Auth(AuthError::ProviderAlreadyLinked("phone".to_string()));
        assert_eq!(
            already_linked.to_string(),
            "Authentication error: Provider phone is already linked to this account"
        );

        let backend = Error::Exchange(ExchangeError::Backend("INVALID_ID_TOKEN".to_string()));
        assert_eq!(
            backend.to_string(),
            "Exchange error: Backend error: INVALID_ID_TOKEN"
        );

        let mismatch = Error::Auth(AuthError::UserMismatch);
        assert_eq!(
            mismatch.to_string(),
            "Authentication error: Credential resolves to a different user"
        );
    }

    #[test]
    fn test_is_auth_error() {
        assert!(Error::Auth(AuthError::UserMismatch).is_auth_error());
        assert!(!Error::Exchange(ExchangeError::TokenExpired).is_auth_error());
    }

    #[test]
    fn test_is_already_linked() {
        assert!(
            Error::Auth(AuthError::ProviderAlreadyLinked("password".to_string()))
                .is_already_linked()
        );
        assert!(
            !Error::Auth(AuthError::ProviderNotLinked("password".to_string())).is_already_linked()
        );
        assert!(
            !Error::Exchange(ExchangeError::InvalidCredential("bad code".to_string()))
                .is_already_linked()
        );
    }

    #[test]
    fn test_error_from_conversions() {
        let error: Error = AuthError::UserMismatch.into();
        assert!(matches!(error, Error::Auth(AuthError::UserMismatch)));

        let error: Error = ExchangeError::TokenExpired.into();
        assert!(matches!(error, Error::Exchange(ExchangeError::TokenExpired)));
        assert!(error.is_exchange_error());
    }
}
