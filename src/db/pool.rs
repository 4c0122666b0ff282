use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DbConfig;

/// Opens the connection pool for the users store. With the default
/// `pool_size` of 1 every statement goes through the same connection,
/// acquired one request at a time.
pub async fn create_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
  PgPoolOptions::new()
    .max_connections(config.pool_size)
    .connect(&config.connection_url())
    .await
}
