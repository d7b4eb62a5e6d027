use redis::{AsyncCommands, Client};

/// Fixed-window request counter backed by Redis.
///
/// Any Redis failure lets the request through.
pub struct RateLimiter {
    client: Client,
}

impl RateLimiter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Counts one hit for `key` and reports whether it is within `limit`
    /// for the current window. A zero `limit` disables the check.
    pub async fn check(&self, key: &str, limit: u32, window_secs: u64) -> bool {
        if limit == 0 {
            return true;
        }
        let mut conn = match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!(error = %e, key, "Rate limiter unavailable, allowing request");
                return true;
            }
        };

        let k = format!("rl:{}", key);
        let count: u32 = match conn.incr(&k, 1).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(error = %e, key, "Rate limiter increment failed, allowing request");
                return true;
            }
        };
        if count == 1 {
            let window = i64::try_from(window_secs).unwrap_or(i64::MAX);
            let _: () = conn.expire(&k, window).await.unwrap_or(());
        }
        count <= limit
    }
}
