use redis::aio::ConnectionManager;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Two-tier cache for computed match results
///
/// L1 is an in-process moka cache, L2 is Redis shared across instances.
/// Both tiers expire entries after the same TTL.
pub struct CacheManager {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1_cache: moka::future::Cache<String, Arc<str>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Connect to Redis and build the in-process tier
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1_cache,
            ttl_secs,
        })
    }

    /// Look a value up, L1 first. `Ok(None)` on a miss.
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned,
    {
        if let Some(json) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(Some(serde_json::from_str(&json)?));
        }

        let value: Option<String> = {
            let mut conn = self.redis.lock().await;
            redis::cmd("GET").arg(key).query_async(&mut *conn).await?
        };

        match value {
            Some(json) => {
                tracing::trace!("L2 cache hit: {}", key);
                let parsed = serde_json::from_str(&json)?;
                self.l1_cache.insert(key.to_string(), Arc::from(json)).await;
                Ok(Some(parsed))
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                Ok(None)
            }
        }
    }

    /// Store a value in both tiers
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        self.l1_cache.insert(key.to_string(), Arc::from(json.as_str())).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("SETEX")
            .arg(key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async::<()>(&mut *conn)
            .await?;

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Drop a single key from both tiers
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("DEL").arg(key).query_async::<()>(&mut *conn).await?;

        tracing::trace!("Cache delete: {}", key);
        Ok(())
    }

    /// Drop every entry whose key starts with `prefix`
    ///
    /// L1 is cleared wholesale; L2 is walked with SCAN so Redis is never
    /// blocked by a KEYS call.
    pub async fn invalidate_prefix(&self, prefix: &str) -> Result<u64, CacheError> {
        self.l1_cache.invalidate_all();

        let pattern = format!("{}*", prefix);
        let mut conn = self.redis.lock().await;
        let mut cursor: u64 = 0;
        let mut removed: u64 = 0;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(200)
                .query_async(&mut *conn)
                .await?;

            if !keys.is_empty() {
                removed += keys.len() as u64;
                redis::cmd("DEL")
                    .arg(keys)
                    .query_async::<()>(&mut *conn)
                    .await?;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        tracing::debug!("Invalidated {} cached entries under {}", removed, prefix);
        Ok(removed)
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    pub const MATCHES_PREFIX: &'static str = "matches:";
    pub const SKILL_GAP_PREFIX: &'static str = "skill_gap:";

    /// Key for a user's ranked job matches at a given limit
    pub fn matches(user_id: i64, limit: usize) -> String {
        format!("{}{}:{}", Self::MATCHES_PREFIX, user_id, limit)
    }

    /// Prefix covering a user's match results at every limit
    pub fn user_matches_prefix(user_id: i64) -> String {
        format!("{}{}:", Self::MATCHES_PREFIX, user_id)
    }

    /// Key for a user's skill gap report
    pub fn skill_gap(user_id: i64) -> String {
        format!("{}{}", Self::SKILL_GAP_PREFIX, user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_cache_set_get_invalidate() {
        let cache = CacheManager::new("redis://127.0.0.1:6379", 1000, 60)
            .await
            .expect("Failed to create cache");

        let key = CacheKey::skill_gap(99);
        cache.set(&key, &vec!["Docker".to_string()]).await.unwrap();
        let cached: Option<Vec<String>> = cache.get(&key).await.unwrap();
        assert_eq!(cached, Some(vec!["Docker".to_string()]));

        cache.invalidate_prefix(CacheKey::SKILL_GAP_PREFIX).await.unwrap();
        assert!(cache.get::<Vec<String>>(&key).await.unwrap().is_none());
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::matches(12, 10), "matches:12:10");
        assert_eq!(CacheKey::skill_gap(12), "skill_gap:12");
        assert!(CacheKey::matches(12, 10).starts_with(CacheKey::MATCHES_PREFIX));
    }

    #[test]
    fn test_user_matches_prefix_is_scoped_to_one_user() {
        let prefix = CacheKey::user_matches_prefix(1);
        assert_eq!(prefix, "matches:1:");
        assert!(CacheKey::matches(1, 50).starts_with(&prefix));
        assert!(!CacheKey::matches(12, 10).starts_with(&prefix));
    }
}
