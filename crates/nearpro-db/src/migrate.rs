//! Embedded schema migrations.

use std::collections::HashSet;

use sqlx::migrate::{Migrate, Migration, Migrator};
use sqlx::PgPool;

use crate::DbError;

// Relative to crates/nearpro-db/Cargo.toml.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every pending migration and return how many were pending.
///
/// The pending set is read from `_sqlx_migrations` (created if missing)
/// before running, so a failed lookup is an error rather than a zero count.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if no connection can be acquired, or
/// [`DbError::Migration`] if the history cannot be read or a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<usize, DbError> {
    let applied: HashSet<i64> = {
        let mut conn = pool.acquire().await?;
        conn.ensure_migrations_table().await?;
        conn.list_applied_migrations()
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect()
    };

    let pending = count_pending(MIGRATOR.iter(), &applied);
    MIGRATOR.run(pool).await?;
    tracing::info!(pending, "migrations up to date");
    Ok(pending)
}

fn count_pending<'a>(
    migrations: impl Iterator<Item = &'a Migration>,
    applied: &HashSet<i64>,
) -> usize {
    migrations
        .filter(|m| !m.migration_type.is_down_migration())
        .filter(|m| !applied.contains(&m.version))
        .count()
}
