//! # DriveDesk DB
//!
//! PostgreSQL pool setup, embedded migrations, and a Postgres-backed
//! [`PageSource`](drivedesk_core::pagination::PageSource).
//!
//! # Example
//!
//! ```ignore
//! use drivedesk_config::DatabaseConfig;
//! use drivedesk_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! ```

pub mod page_source;

use drivedesk_config::DatabaseConfig;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, instrument};

pub use page_source::PgPageSource;
// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Opens a PostgreSQL connection pool.
///
/// Call once at startup; the pool is cheaply cloneable.
#[instrument(skip(config), fields(max_connections = config.max_connections))]
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!("database pool ready");
    Ok(pool)
}

/// Applies the migrations embedded from the workspace `migrations/` directory.
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;

    info!("migrations applied");
    Ok(())
}
