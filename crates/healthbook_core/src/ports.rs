//! crates/healthbook_core/src/ports.rs
//!
//! Defines the service contracts (traits) the site's request handling depends on.
//! The gatekeeper and the auth endpoints only see these traits, so the mock
//! credential store and the token format can be swapped without touching them.

use async_trait::async_trait;
use crate::domain::{SessionClaims, User};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Checks an email/password pair.
    ///
    /// Returns `PortError::Unauthorized` when the email is unknown or the
    /// password does not match.
    async fn verify_credentials(&self, email: &str, password: &str) -> PortResult<User>;

    /// The opaque access token the backend hands out alongside a user.
    fn access_token_for(&self, user: &User) -> String;
}

#[async_trait]
pub trait SessionService: Send + Sync {
    /// Signs a new session token for `user`.
    fn issue(&self, user: &User, access_token: &str) -> PortResult<String>;

    /// Verifies a session token.
    ///
    /// `Ok(None)` means the token is invalid or expired and the caller should
    /// treat the request as unauthenticated. `Err` is reserved for failures of
    /// the verifier itself.
    async fn verify(&self, token: &str) -> PortResult<Option<SessionClaims>>;
}
