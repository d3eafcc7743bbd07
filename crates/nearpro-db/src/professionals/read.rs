//! Read operations for the `professionals` table.

use nearpro_core::DirectoryFilters;
use sqlx::PgPool;

use super::types::ProfessionalRow;

const SELECT_COLUMNS: &str = "SELECT id, public_id, user_id, display_name, category, \
        is_available, is_active, latitude, longitude, prices, \
        rating_average, review_count, created_at, updated_at \
     FROM professionals";

/// Fetch a professional by id, active or not.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn get_professional(
    pool: &PgPool,
    id: i64,
) -> Result<Option<ProfessionalRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfessionalRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Return active, available professionals that have a location, narrowed by
/// the optional category, rating floor, and bounding box in `filters`.
///
/// Distance is not evaluated here. Results are ordered by `id ASC`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_searchable_professionals(
    pool: &PgPool,
    filters: &DirectoryFilters,
) -> Result<Vec<ProfessionalRow>, sqlx::Error> {
    let bounds = filters.bounds;
    sqlx::query_as::<_, ProfessionalRow>(&format!(
        "{SELECT_COLUMNS} \
         WHERE is_active = TRUE \
           AND is_available = TRUE \
           AND latitude IS NOT NULL \
           AND longitude IS NOT NULL \
           AND ($1::TEXT IS NULL OR category = $1) \
           AND ($2::FLOAT8 IS NULL OR rating_average >= $2) \
           AND ($3::FLOAT8 IS NULL OR latitude BETWEEN $3 AND $4) \
           AND ($5::FLOAT8 IS NULL OR longitude BETWEEN $5 AND $6) \
         ORDER BY id ASC"
    ))
    .bind(filters.category.map(|c| c.as_str()))
    .bind(filters.min_rating_floor)
    .bind(bounds.map(|b| b.min_lat))
    .bind(bounds.map(|b| b.max_lat))
    .bind(bounds.map(|b| b.min_lon))
    .bind(bounds.map(|b| b.max_lon))
    .fetch_all(pool)
    .await
}
