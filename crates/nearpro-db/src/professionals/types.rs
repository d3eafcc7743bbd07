//! Row types for the `professionals` table.

use chrono::{DateTime, Utc};
use nearpro_core::{Category, Coordinate, ProfessionalRecord};
use uuid::Uuid;

use crate::DbError;

/// Input record for creating or updating a professional profile.
#[derive(Debug, Clone)]
pub struct NewProfessional {
    pub user_id: Uuid,
    pub display_name: String,
    pub category: Category,
    pub location: Option<Coordinate>,
    pub is_available: bool,
    pub prices: serde_json::Value,
    pub rating_average: f64,
    pub review_count: u32,
}

/// A row from the `professionals` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfessionalRow {
    pub id: i64,
    pub public_id: Uuid,
    pub user_id: Uuid,
    pub display_name: String,
    pub category: String,
    pub is_available: bool,
    pub is_active: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub prices: serde_json::Value,
    pub rating_average: f64,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProfessionalRow> for ProfessionalRecord {
    type Error = DbError;

    /// Fails only when the stored row breaks an invariant the schema should
    /// already enforce (unknown category, out-of-range coordinates).
    fn try_from(row: ProfessionalRow) -> Result<Self, Self::Error> {
        let malformed = |reason: String| DbError::MalformedRow { id: row.id, reason };

        let category = row
            .category
            .parse::<Category>()
            .map_err(|e| malformed(e.to_string()))?;

        let location = match (row.latitude, row.longitude) {
            (Some(lat), Some(lon)) => {
                Some(Coordinate::new(lat, lon).map_err(|e| malformed(e.to_string()))?)
            }
            _ => None,
        };

        let review_count =
            u32::try_from(row.review_count).map_err(|e| malformed(e.to_string()))?;

        Ok(ProfessionalRecord {
            id: row.id,
            user_id: row.user_id,
            display_name: row.display_name,
            category,
            location,
            is_available: row.is_available,
            is_active: row.is_active,
            prices: row.prices,
            rating_average: row.rating_average,
            review_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ProfessionalRow {
        ProfessionalRow {
            id: 9,
            public_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            display_name: "Uñas Bellas".to_string(),
            category: "MANICURIST".to_string(),
            is_available: true,
            is_active: true,
            latitude: Some(-33.45),
            longitude: Some(-70.66),
            prices: serde_json::json!({"Gel": 12000}),
            rating_average: 4.9,
            review_count: 140,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn converts_valid_row() {
        let record = ProfessionalRecord::try_from(row()).expect("valid row");
        assert_eq!(record.id, 9);
        assert_eq!(record.category, Category::Manicurist);
        assert!(record.location.is_some());
        assert_eq!(record.review_count, 140);
    }

    #[test]
    fn missing_longitude_means_no_location() {
        let mut r = row();
        r.longitude = None;
        let record = ProfessionalRecord::try_from(r).expect("valid row");
        assert!(record.location.is_none());
    }

    #[test]
    fn unknown_category_is_malformed() {
        let mut r = row();
        r.category = "PLUMBER".to_string();
        let err = ProfessionalRecord::try_from(r).unwrap_err();
        assert!(matches!(err, DbError::MalformedRow { id: 9, .. }));
    }

    #[test]
    fn out_of_range_latitude_is_malformed() {
        let mut r = row();
        r.latitude = Some(95.0);
        assert!(ProfessionalRecord::try_from(r).is_err());
    }
}
