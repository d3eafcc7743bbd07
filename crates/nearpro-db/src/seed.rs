use nearpro_core::ProfessionalSeed;
use sqlx::PgPool;

use crate::{professionals::upsert_professional, DbError, NewProfessional};

/// Upsert professionals from the seed file into the database.
///
/// Returns the number of professionals processed (inserted or updated).
/// All upserts run inside a single transaction; if any operation fails
/// the entire batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails, or
/// [`DbError::MalformedRow`] if a seed has an out-of-range location, or
/// [`DbError::OutOfRange`] if its review count does not fit the column.
pub async fn seed_professionals(
    pool: &PgPool,
    professionals: &[ProfessionalSeed],
) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;

    for pro in professionals {
        let location = pro.location().map_err(|e| DbError::MalformedRow {
            id: 0,
            reason: format!("{}: {e}", pro.user_id),
        })?;

        let new = NewProfessional {
            user_id: pro.user_id,
            display_name: pro.display_name.clone(),
            category: pro.category,
            location,
            is_available: pro.available,
            prices: serde_json::Value::Object(pro.prices.clone()),
            rating_average: pro.rating_average,
            review_count: pro.review_count,
        };
        let row = upsert_professional(&mut *tx, &new).await?;
        tracing::debug!(id = row.id, user_id = %row.user_id, "seeded professional");

        count += 1;
    }

    tx.commit().await?;
    tracing::info!(count, "seeded professionals");
    Ok(count)
}
