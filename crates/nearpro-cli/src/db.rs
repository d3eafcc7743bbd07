//! `db` sub-command handlers.

use std::path::PathBuf;

use clap::Subcommand;

/// Sub-commands available under `db`.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Check that the database answers
    Ping,
    /// Apply pending migrations
    Migrate,
    /// Upsert professionals from the seed file
    Seed {
        /// Seed file to load instead of `NEARPRO_SEED_PATH`
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// # Errors
///
/// Returns an error if the database is unreachable, a migration fails, or the
/// seed file cannot be read, parsed, or written.
pub(crate) async fn run(
    pool: &sqlx::PgPool,
    config: &nearpro_core::AppConfig,
    command: DbCommands,
) -> anyhow::Result<()> {
    match command {
        DbCommands::Ping => {
            nearpro_db::ping(pool).await?;
            println!("database ok");
        }
        DbCommands::Migrate => {
            let applied = nearpro_db::run_migrations(pool).await?;
            println!("applied {applied} migration(s)");
        }
        DbCommands::Seed { path } => {
            let path = path.unwrap_or_else(|| config.seed_path.clone());
            let seed = nearpro_core::load_seed_file(&path)?;

            nearpro_db::run_migrations(pool).await?;
            let count = nearpro_db::seed_professionals(pool, &seed.professionals).await?;
            println!("seeded {count} professional(s) from {}", path.display());
        }
    }
    Ok(())
}
