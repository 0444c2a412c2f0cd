//! JWT implementation of the `AuthService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::models::User;
use crate::services::auth_service::{AuthError, AuthService};
use crate::services::revocation::RevocationStore;
use crate::services::tokens::{Claims, TokenKind, TokenPair, TokenSigner};

pub struct JwtAuthService {
    store: Store,
    revocation: Arc<dyn RevocationStore>,
    signer: TokenSigner,
}

impl JwtAuthService {
    #[must_use]
    pub fn new(store: Store, revocation: Arc<dyn RevocationStore>, signer: TokenSigner) -> Self {
        Self {
            store,
            revocation,
            signer,
        }
    }

    /// Verifies a token of the given kind through the identity-tier gates:
    /// signature/expiry, revocation, subject resolution. The active-status
    /// gate is the caller's.
    async fn verify_subject(&self, token: &str, kind: TokenKind) -> Result<(Claims, User), AuthError> {
        let claims = self
            .signer
            .verify(token, kind)
            .map_err(|_| AuthError::InvalidCredential)?;

        if self.revocation.is_revoked(&claims.jti).await? {
            return Err(AuthError::InvalidCredential);
        }

        // A signed token always carries the id we put in it; anything else
        // is a forgery that slipped the signature check, so reject it the
        // same way.
        let user_id: i32 = claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidCredential)?;

        let user = self
            .store
            .get_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // A soft-deleted user never resolves to a session.
        if user.is_deleted() {
            return Err(AuthError::UserNotFound);
        }

        Ok((claims, user))
    }

    fn gate_active(user: User) -> Result<User, AuthError> {
        if !user.is_active {
            return Err(AuthError::Inactive);
        }
        Ok(user)
    }
}

#[async_trait]
impl AuthService for JwtAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError> {
        let is_valid = self.store.verify_user_password(username, password).await?;

        if !is_valid {
            return Err(AuthError::InvalidCredential);
        }

        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.is_deleted() {
            return Err(AuthError::UserNotFound);
        }
        let user = Self::gate_active(user)?;

        let pair = self
            .signer
            .issue_pair(user.id)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        info!("Issued token pair for user: {}", user.username);
        Ok(pair)
    }

    async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let (_, user) = self.verify_subject(token, TokenKind::Access).await?;
        Self::gate_active(user)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let (claims, user) = self.verify_subject(refresh_token, TokenKind::Refresh).await?;
        let user = Self::gate_active(user)?;

        // Rotation: the presented refresh token is spent. TTL matches its
        // remaining validity so the entry expires with the token.
        self.revocation
            .revoke(&claims.jti, claims.remaining_ttl())
            .await?;

        let pair = self
            .signer
            .issue_pair(user.id)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        info!("Rotated refresh token for user: {}", user.username);
        Ok(pair)
    }

    async fn logout(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<(), AuthError> {
        // Verify before revoking; a failed verification must not mutate
        // the store.
        let claims = self
            .signer
            .verify(access_token, TokenKind::Access)
            .map_err(|_| AuthError::InvalidCredential)?;

        self.revocation
            .revoke(&claims.jti, claims.remaining_ttl())
            .await?;

        if let Some(token) = refresh_token
            && let Ok(refresh_claims) = self.signer.verify(token, TokenKind::Refresh)
        {
            self.revocation
                .revoke(&refresh_claims.jti, refresh_claims.remaining_ttl())
                .await?;
        }

        Ok(())
    }
}
