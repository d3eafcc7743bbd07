//! Write operations for the `professionals` table.
//!
//! Rows are never physically deleted; [`deactivate_professional`] clears
//! `is_active` instead. Availability and location edits only touch active rows.

use nearpro_core::Coordinate;
use sqlx::{PgExecutor, PgPool};

use super::types::{NewProfessional, ProfessionalRow};
use crate::DbError;

const RETURNING_COLUMNS: &str = "RETURNING id, public_id, user_id, display_name, category, \
        is_available, is_active, latitude, longitude, prices, \
        rating_average, review_count, created_at, updated_at";

/// Insert a professional, or update the existing profile for the same
/// `user_id`. Reactivates a previously deactivated profile.
///
/// Accepts any executor so seeding can run it inside a transaction.
///
/// # Errors
///
/// Returns [`DbError::OutOfRange`] if `review_count` exceeds the `INTEGER`
/// column, or [`DbError::Sqlx`] if the query fails, including when a schema
/// check rejects the values.
pub async fn upsert_professional<'e, E>(
    executor: E,
    new: &NewProfessional,
) -> Result<ProfessionalRow, DbError>
where
    E: PgExecutor<'e>,
{
    let review_count = review_count_column(new.review_count)?;

    let row = sqlx::query_as::<_, ProfessionalRow>(&format!(
        "INSERT INTO professionals \
             (user_id, display_name, category, latitude, longitude, \
              is_available, prices, rating_average, review_count) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         ON CONFLICT (user_id) DO UPDATE SET \
             display_name   = EXCLUDED.display_name, \
             category       = EXCLUDED.category, \
             latitude       = EXCLUDED.latitude, \
             longitude      = EXCLUDED.longitude, \
             is_available   = EXCLUDED.is_available, \
             is_active      = TRUE, \
             prices         = EXCLUDED.prices, \
             rating_average = EXCLUDED.rating_average, \
             review_count   = EXCLUDED.review_count, \
             updated_at     = NOW() \
         {RETURNING_COLUMNS}"
    ))
    .bind(new.user_id)
    .bind(&new.display_name)
    .bind(new.category.as_str())
    .bind(new.location.map(|c| c.latitude()))
    .bind(new.location.map(|c| c.longitude()))
    .bind(new.is_available)
    .bind(&new.prices)
    .bind(new.rating_average)
    .bind(review_count)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

fn review_count_column(count: u32) -> Result<i32, DbError> {
    i32::try_from(count).map_err(|_| DbError::OutOfRange {
        field: "review_count",
        value: u64::from(count),
    })
}

/// Flip the availability flag on an active professional.
///
/// Returns `None` if no active professional has this id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn set_availability(
    pool: &PgPool,
    id: i64,
    is_available: bool,
) -> Result<Option<ProfessionalRow>, DbError> {
    let row = sqlx::query_as::<_, ProfessionalRow>(&format!(
        "UPDATE professionals \
         SET is_available = $2, updated_at = NOW() \
         WHERE id = $1 AND is_active = TRUE \
         {RETURNING_COLUMNS}"
    ))
    .bind(id)
    .bind(is_available)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Set the location of an active professional.
///
/// Returns `None` if no active professional has this id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn set_location(
    pool: &PgPool,
    id: i64,
    location: Coordinate,
) -> Result<Option<ProfessionalRow>, DbError> {
    let row = sqlx::query_as::<_, ProfessionalRow>(&format!(
        "UPDATE professionals \
         SET latitude = $2, longitude = $3, updated_at = NOW() \
         WHERE id = $1 AND is_active = TRUE \
         {RETURNING_COLUMNS}"
    ))
    .bind(id)
    .bind(location.latitude())
    .bind(location.longitude())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Soft-delete a professional. Deactivated profiles never appear in search.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no active professional has this id, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn deactivate_professional(pool: &PgPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE professionals \
         SET is_active = FALSE, is_available = FALSE, updated_at = NOW() \
         WHERE id = $1 AND is_active = TRUE",
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_count_fits_up_to_i32_max() {
        assert_eq!(review_count_column(0).expect("fits"), 0);
        assert_eq!(review_count_column(2_147_483_647).expect("fits"), i32::MAX);
    }

    #[test]
    fn review_count_above_i32_max_is_rejected() {
        let err = review_count_column(3_000_000_000).unwrap_err();
        assert!(matches!(
            err,
            DbError::OutOfRange {
                field: "review_count",
                value: 3_000_000_000
            }
        ));
    }
}
