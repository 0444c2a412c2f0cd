//! Domain service for token-based authentication.
//!
//! Issues access/refresh token pairs, resolves bearer tokens to active
//! users, and revokes tokens on logout and rotation.

use thiserror::Error;

use crate::models::User;
use crate::services::tokens::TokenPair;

/// Errors specific to authentication operations.
///
/// `InvalidCredential` and `UserNotFound` are presented to clients as the
/// same uniform rejection; distinguishing them would leak which accounts
/// exist. `Inactive` is an authorization failure on a resolved identity and
/// stays distinguishable.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Could not validate credentials")]
    InvalidCredential,

    #[error("User not found")]
    UserNotFound,

    #[error("Inactive user")]
    Inactive,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and issues a fresh token pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredential`] for a bad username or
    /// password, without telling the two apart.
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Resolves a bearer access token to its active user.
    ///
    /// Gate order: signature/expiry, revocation, subject resolution,
    /// active-status. No store is mutated on any failure path.
    async fn authenticate(&self, token: &str) -> Result<User, AuthError>;

    /// Rotates a refresh token: the presented token is revoked for its
    /// remaining validity and a new pair is issued.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Revokes the presented access token, and the refresh token when one
    /// is supplied and verifies.
    async fn logout(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<(), AuthError>;
}
