//! Revocation store for logged-out and rotated-out tokens.
//!
//! Entries are keyed by the token's `jti` and written with a TTL equal to
//! the token's remaining validity, so the store self-prunes and never
//! outlives the tokens it blocks.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use bb8_redis::{RedisConnectionManager, bb8, redis::AsyncCommands};

#[async_trait]
pub trait RevocationStore: Send + Sync {
    async fn is_revoked(&self, jti: &str) -> Result<bool>;

    async fn revoke(&self, jti: &str, ttl: Duration) -> Result<()>;
}

fn revocation_key(jti: &str) -> String {
    format!("parkarr:revoked:{jti}")
}

/// Redis-backed store for multi-instance deployments.
pub struct RedisRevocationStore {
    pool: bb8::Pool<RedisConnectionManager>,
}

impl RedisRevocationStore {
    pub async fn connect(url: &str) -> Result<Self> {
        let manager =
            RedisConnectionManager::new(url).context("Invalid revocation store URL")?;
        let pool = bb8::Pool::builder()
            .build(manager)
            .await
            .context("Failed to connect to revocation store")?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn is_revoked(&self, jti: &str) -> Result<bool> {
        let mut conn = self
            .pool
            .get()
            .await
            .context("Failed to acquire revocation store connection")?;

        let exists: bool = conn
            .exists(revocation_key(jti))
            .await
            .context("Revocation lookup failed")?;

        Ok(exists)
    }

    async fn revoke(&self, jti: &str, ttl: Duration) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .await
            .context("Failed to acquire revocation store connection")?;

        let _: () = conn
            .set_ex(revocation_key(jti), 1u8, ttl.as_secs().max(1))
            .await
            .context("Revocation write failed")?;

        Ok(())
    }
}

/// In-process store for tests and single-node deployments without redis.
/// Expired entries are dropped lazily on lookup.
#[derive(Default)]
pub struct MemoryRevocationStore {
    entries: Mutex<HashMap<String, Instant>>,
}

impl MemoryRevocationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn is_revoked(&self, jti: &str) -> Result<bool> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        entries.retain(|_, deadline| *deadline > now);
        Ok(entries.contains_key(jti))
    }

    async fn revoke(&self, jti: &str, ttl: Duration) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(jti.to_string(), Instant::now() + ttl);
        Ok(())
    }
}
