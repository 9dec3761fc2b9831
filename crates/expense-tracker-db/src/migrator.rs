//! Embedded schema migrations.
//!
//! Migrations live in the workspace `migrations/` directory as reversible
//! `<version>_<name>.up.sql` / `.down.sql` pairs and are compiled into the
//! binary. Applied versions are tracked by sqlx in `_sqlx_migrations`.

use sqlx::PgPool;
use sqlx::migrate::{Migrate, MigrateError, Migrator};
use tracing::info;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub version: i64,
    pub description: String,
    pub applied: bool,
}

/// Applies every pending migration in version order.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Migrations applied");
    Ok(())
}

/// Reverts the `steps` most recently applied migrations, newest first.
///
/// Returns the versions that were reverted. Asking for more steps than there
/// are applied migrations reverts everything.
pub async fn rollback(pool: &PgPool, steps: usize) -> Result<Vec<i64>, MigrateError> {
    let mut applied = applied_versions(pool).await?;
    applied.sort_unstable_by(|a, b| b.cmp(a));

    if steps == 0 || applied.is_empty() {
        return Ok(Vec::new());
    }

    let reverted: Vec<i64> = applied.iter().take(steps).copied().collect();
    let target = applied.get(steps).copied().unwrap_or(0);

    MIGRATOR.undo(pool, target).await?;

    for version in &reverted {
        info!(version, "Migration rolled back");
    }

    Ok(reverted)
}

/// Lists every known migration with whether it has been applied.
pub async fn migration_status(pool: &PgPool) -> Result<Vec<MigrationStatus>, MigrateError> {
    let applied = applied_versions(pool).await?;

    Ok(MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .map(|m| MigrationStatus {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect())
}

async fn applied_versions(pool: &PgPool) -> Result<Vec<i64>, MigrateError> {
    let mut conn = pool.acquire().await?;
    conn.ensure_migrations_table().await?;

    Ok(conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect())
}
