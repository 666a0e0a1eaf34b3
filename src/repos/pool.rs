//! PostgreSQL connection pool.
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::Config;

/// Connect eagerly so an unreachable store fails startup instead of the first request.
///
/// Every pooled connection gets `statement_timeout` set from `DB_STATEMENT_TIMEOUT_MS`.
pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    tracing::info!("connecting to PostgreSQL");

    let statement_timeout_ms = config.db_statement_timeout.as_millis().to_string();
    let options = PgConnectOptions::from_str(&config.database_url)?
        .options([("statement_timeout", statement_timeout_ms)]);

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect_with(options)
        .await?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "connected to PostgreSQL"
    );

    Ok(pool)
}
