//! Redis implementation of the redirect repository.
//!
//! Each slug is a Redis list laid out by [`super::record_codec`]. Writes that
//! must not interleave with other clients run as Lua scripts, which Redis
//! executes atomically.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, Script, aio::ConnectionManager};
use tracing::{debug, info};

use super::record_codec::{self, CLICKS_INDEX};
use crate::domain::entities::{NewRedirect, Redirect};
use crate::domain::repositories::{RedirectRepository, StoreError};

/// Pushes the record only if the key does not exist yet. Returns 1 if written.
const INSERT_IF_ABSENT_LUA: &str = r"
if redis.call('EXISTS', KEYS[1]) == 1 then
    return 0
end
redis.call('RPUSH', KEYS[1], ARGV[1], ARGV[2], ARGV[3])
return 1
";

/// Increments the counter at index ARGV[1] and returns the new value.
///
/// Missing keys yield nil and are not recreated. Two-element records from
/// older releases get the counter appended. Records the codec would reject
/// are left untouched and reported with a negative status.
const INCREMENT_CLICKS_LUA: &str = r"
local len = redis.call('LLEN', KEYS[1])
if len == 0 then
    return false
end
if len < 2 then
    return -1
end
if len == 2 then
    redis.call('RPUSH', KEYS[1], '1')
    return 1
end
if len > 3 then
    return -2
end
local raw = redis.call('LINDEX', KEYS[1], ARGV[1])
if not string.match(raw, '^%d+$') then
    return -3
end
local clicks = tonumber(raw) + 1
redis.call('LSET', KEYS[1], ARGV[1], tostring(clicks))
return clicks
";

fn backend(e: redis::RedisError) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// Redirect storage backed by Redis lists.
///
/// Uses a `ConnectionManager`, which reconnects transparently and is cheap to
/// clone, so one instance serves the whole process.
pub struct RedisRedirectRepository {
    client: ConnectionManager,
    insert_script: Script,
    increment_script: Script,
}

impl RedisRedirectRepository {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Backend(format!("Failed to create Redis client: {e}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to connect to Redis: {e}")))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Backend(format!("Redis PING failed: {e}")))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            insert_script: Script::new(INSERT_IF_ABSENT_LUA),
            increment_script: Script::new(INCREMENT_CLICKS_LUA),
        })
    }
}

#[async_trait]
impl RedirectRepository for RedisRedirectRepository {
    async fn insert_if_absent(&self, new_redirect: NewRedirect) -> Result<bool, StoreError> {
        let mut conn = self.client.clone();
        let [target, key, clicks] = record_codec::encode(&new_redirect);

        let written: i64 = self
            .insert_script
            .key(&new_redirect.slug)
            .arg(target)
            .arg(key)
            .arg(clicks)
            .invoke_async(&mut conn)
            .await
            .map_err(backend)?;

        debug!(slug = %new_redirect.slug, written = written == 1, "RPUSH if absent");
        Ok(written == 1)
    }

    async fn find(&self, slug: &str) -> Result<Option<Redirect>, StoreError> {
        let mut conn = self.client.clone();

        let fields: Vec<String> = conn.lrange(slug, 0, -1).await.map_err(backend)?;

        record_codec::decode(slug, fields)
    }

    async fn increment_clicks(&self, slug: &str) -> Result<Option<u64>, StoreError> {
        let mut conn = self.client.clone();

        let status: Option<i64> = self
            .increment_script
            .key(slug)
            .arg(CLICKS_INDEX)
            .invoke_async(&mut conn)
            .await
            .map_err(backend)?;

        let corrupt = |reason: &str| StoreError::Corrupt {
            slug: slug.to_string(),
            reason: reason.to_string(),
        };

        match status {
            None => Ok(None),
            Some(-1) => Err(corrupt("admin key missing")),
            Some(-2) => Err(corrupt("unexpected trailing element(s)")),
            Some(-3) => Err(corrupt("click counter is not a number")),
            Some(clicks) => u64::try_from(clicks)
                .map(Some)
                .map_err(|_| corrupt("click counter is negative")),
        }
    }

    async fn delete(&self, slug: &str) -> Result<bool, StoreError> {
        let mut conn = self.client.clone();

        let deleted: i64 = conn.del(slug).await.map_err(backend)?;
        Ok(deleted > 0)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
