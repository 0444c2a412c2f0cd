//! Signed token issuance and verification.
//!
//! Access and refresh tokens are HS256 JWTs with independent secrets and
//! lifetimes. Every token carries a `jti` so it can be revoked without
//! storing the credential itself.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::AuthConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Token identifier, the revocation key
    pub jti: String,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Seconds until natural expiry, used as the revocation TTL. At least
    /// one second so a revocation written at the expiry boundary still lands.
    #[must_use]
    pub fn remaining_ttl(&self) -> std::time::Duration {
        let secs = self.exp - Utc::now().timestamp();
        std::time::Duration::from_secs(secs.max(1).unsigned_abs())
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token")]
    Invalid,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

/// Issues and verifies the access/refresh token pair.
pub struct TokenSigner {
    access: KeyPair,
    refresh: KeyPair,
    validation: Validation,
}

impl TokenSigner {
    #[must_use]
    pub fn new(auth: &AuthConfig) -> Self {
        // Zero leeway: an expired token is expired, full stop.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            access: KeyPair {
                encoding: EncodingKey::from_secret(auth.access_secret.as_bytes()),
                decoding: DecodingKey::from_secret(auth.access_secret.as_bytes()),
                ttl: Duration::minutes(auth.access_ttl_minutes),
            },
            refresh: KeyPair {
                encoding: EncodingKey::from_secret(auth.refresh_secret.as_bytes()),
                decoding: DecodingKey::from_secret(auth.refresh_secret.as_bytes()),
                ttl: Duration::minutes(auth.refresh_ttl_minutes),
            },
            validation,
        }
    }

    const fn keys(&self, kind: TokenKind) -> &KeyPair {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    pub fn issue(&self, kind: TokenKind, user_id: i32) -> Result<String, TokenError> {
        let keys = self.keys(kind);
        let now = Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            kind,
            iat: now.timestamp(),
            exp: (now + keys.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &keys.encoding).map_err(|_| TokenError::Invalid)
    }

    pub fn issue_pair(&self, user_id: i32) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue(TokenKind::Access, user_id)?,
            refresh_token: self.issue(TokenKind::Refresh, user_id)?,
        })
    }

    /// Verifies signature and expiry against the secret for `expected`, and
    /// rejects tokens of the other kind even when their signature happens to
    /// check out.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let keys = self.keys(expected);

        let data = decode::<Claims>(token, &keys.decoding, &self.validation)
            .map_err(|_| TokenError::Invalid)?;

        if data.claims.kind != expected {
            return Err(TokenError::Invalid);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            access_secret: "access-test-secret".to_string(),
            refresh_secret: "refresh-test-secret".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_minutes: 60,
        }
    }

    #[test]
    fn access_token_verifies_and_carries_subject() {
        let signer = TokenSigner::new(&test_config());
        let token = signer.issue(TokenKind::Access, 42).unwrap();

        let claims = signer.verify(&token, TokenKind::Access).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.kind, TokenKind::Access);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn refresh_token_is_rejected_as_access_token() {
        let signer = TokenSigner::new(&test_config());
        let token = signer.issue(TokenKind::Refresh, 42).unwrap();

        assert!(signer.verify(&token, TokenKind::Access).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut config = test_config();
        config.access_ttl_minutes = -5;
        let expired_signer = TokenSigner::new(&config);
        let token = expired_signer.issue(TokenKind::Access, 7).unwrap();

        let signer = TokenSigner::new(&test_config());
        assert!(signer.verify(&token, TokenKind::Access).is_err());
    }

    #[test]
    fn token_signed_with_wrong_secret_is_rejected() {
        let mut other = test_config();
        other.access_secret = "some-other-secret".to_string();
        let token = TokenSigner::new(&other)
            .issue(TokenKind::Access, 7)
            .unwrap();

        let signer = TokenSigner::new(&test_config());
        assert!(signer.verify(&token, TokenKind::Access).is_err());
    }

    #[test]
    fn fresh_token_reports_positive_remaining_ttl() {
        let signer = TokenSigner::new(&test_config());
        let token = signer.issue(TokenKind::Access, 1).unwrap();
        let claims = signer.verify(&token, TokenKind::Access).unwrap();

        let ttl = claims.remaining_ttl();
        assert!(ttl.as_secs() > 14 * 60);
        assert!(ttl.as_secs() <= 15 * 60);
    }
}
