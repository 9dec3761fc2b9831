//! # Expense Tracker DB
//!
//! PostgreSQL connection pool and schema migrations.
//!
//! - [`init_db_pool`]: builds a pool from [`DatabaseConfig`]
//! - [`migrator`]: applies, rolls back and reports the embedded migrations
//!
//! # Example
//!
//! ```ignore
//! use expense_tracker_config::DatabaseConfig;
//! use expense_tracker_db::{init_db_pool, migrator};
//!
//! let config = DatabaseConfig::from_env()?;
//! let pool = init_db_pool(&config).await?;
//! migrator::run_migrations(&pool).await?;
//! ```

pub mod migrator;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use expense_tracker_config::DatabaseConfig;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects to PostgreSQL.
///
/// The returned pool is cheaply cloneable and should be shared through the
/// application state.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "Database pool ready");

    Ok(pool)
}
