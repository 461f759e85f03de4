use std::sync::Arc;

use anyhow::{Context, Result};
use redis::Client;
use tracing::info;

use crate::config::environment::EnvironmentVariables;

/// Key prefix for session entries
const SESSION_KEY_PREFIX: &str = "session:";

#[derive(Debug, Clone)]
pub struct RedisService {
    client: Client,
}

impl RedisService {
    pub fn new(env: Arc<EnvironmentVariables>) -> Result<Self> {
        let client: Client =
            Client::open(env.redis_url.as_ref()).context("Failed to create Redis client")?;
        Ok(Self { client })
    }

    pub async fn initialize(&self) -> Result<()> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to connect to Redis")?;

        // Simple ping to verify connection
        let _: () = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("Failed to ping Redis")?;

        info!("Redis connection established successfully");
        Ok(())
    }

    pub async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to get Redis multiplexed connection")
    }

    pub async fn shutdown(&self) {
        // Redis client handles connection pooling/dropping automatically.
        // No explicit shutdown required for the client itself.
        info!("Redis service shutdown (noop)");
    }

    /// Stores a session payload under `session:{token}` with an expiration
    pub async fn store_session(&self, token: &str, payload: &str, ttl_seconds: u64) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let key: String = format!("{SESSION_KEY_PREFIX}{token}");

        let _: () = redis::cmd("SET")
            .arg(&key)
            .arg(payload)
            .arg("EX")
            .arg(ttl_seconds)
            .query_async(&mut conn)
            .await
            .context("Failed to store session in Redis")?;

        Ok(())
    }

    /// Fetches a session payload by token; `None` on miss or expiry
    pub async fn fetch_session(&self, token: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;
        let key: String = format!("{SESSION_KEY_PREFIX}{token}");

        let payload: Option<String> = redis::cmd("GET")
            .arg(&key)
            .query_async(&mut conn)
            .await
            .context("Failed to fetch session from Redis")?;

        Ok(payload)
    }
}
