//! Database connection pool

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Builds a pool without opening a connection; the storage session is
/// established on first use.
///
/// Must be called from within a Tokio runtime: the pool spawns its
/// maintenance task on the current runtime even though no connection is
/// opened yet.
pub fn create_lazy_pool(
    url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_lazy(url)
}
