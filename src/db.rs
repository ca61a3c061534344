use std::time::Duration;

use anyhow::Result;
use rand::Rng;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector};
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;

pub type DbPool = sqlx::PgPool;
pub type OrmConn = DatabaseConnection;

const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Connect to Postgres with bounded retries. After the last attempt fails the
/// pool is created lazily and the process keeps running, so `/health` stays
/// up and request handlers surface their own errors until connectivity
/// returns.
pub async fn create_pool(config: &AppConfig) -> Result<DbPool> {
    let options = || PgPoolOptions::new().max_connections(10);

    for attempt in 1..=config.db_connect_attempts {
        match options().connect(&config.database_url).await {
            Ok(pool) => {
                tracing::info!(attempt, "database connected");
                return Ok(pool);
            }
            Err(err) => {
                if attempt == config.db_connect_attempts {
                    tracing::error!(
                        error = %err,
                        attempts = config.db_connect_attempts,
                        "database unreachable; continuing with a lazy pool"
                    );
                    break;
                }
                let wait = backoff_delay(attempt, config.db_connect_base_delay_ms);
                tracing::warn!(
                    error = %err,
                    attempt,
                    max_attempts = config.db_connect_attempts,
                    wait_ms = wait.as_millis() as u64,
                    "database connection failed, retrying"
                );
                tokio::time::sleep(wait).await;
            }
        }
    }

    Ok(options().connect_lazy(&config.database_url)?)
}

/// SeaORM connection sharing the sqlx pool, so both faces of the persistence
/// layer use the same connections.
pub fn create_orm_conn(pool: &DbPool) -> OrmConn {
    SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone())
}

/// Exponential backoff with jitter: `base * 2^(attempt-1)` plus up to 200ms
/// of noise, capped at [`MAX_BACKOFF`].
pub fn backoff_delay(attempt: u32, base_delay_ms: u64) -> Duration {
    let exp = base_delay_ms.saturating_mul(1u64 << (attempt - 1).min(16));
    let jitter = rand::thread_rng().gen_range(0..200);
    Duration::from_millis(exp.saturating_add(jitter)).min(MAX_BACKOFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_until_the_cap() {
        let base = 500;
        let mut last = Duration::ZERO;
        // Jitter tops out at 200ms, below the doubling step, so the sequence
        // stays monotone until it hits the cap.
        for attempt in 1..=5 {
            let delay = backoff_delay(attempt, base);
            assert!(delay > last, "attempt {attempt} did not grow");
            last = delay;
        }
        assert_eq!(backoff_delay(6, base), MAX_BACKOFF);
        assert_eq!(backoff_delay(30, base), MAX_BACKOFF);
    }

    #[test]
    fn jitter_stays_within_its_window() {
        for _ in 0..50 {
            let delay = backoff_delay(1, 500);
            assert!(delay >= Duration::from_millis(500));
            assert!(delay < Duration::from_millis(700));
        }
    }

    #[test]
    fn large_attempts_do_not_overflow() {
        assert_eq!(backoff_delay(u32::MAX, u64::MAX), MAX_BACKOFF);
    }
}
