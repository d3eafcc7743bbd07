use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Barber,
    TattooArtist,
    Manicurist,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Barber, Self::TattooArtist, Self::Manicurist];

    /// Canonical spelling used in storage and on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Barber => "BARBER",
            Category::TattooArtist => "TATTOO_ARTIST",
            Category::Manicurist => "MANICURIST",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Case-insensitive; accepts `-` in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == canonical)
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// A professional profile as held by the directory.
///
/// `prices` is kept in its stored JSON form; it may contain entries of either
/// shape, or junk, and is only interpreted through
/// [`crate::pricing::normalize_price_map`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalRecord {
    pub id: i64,
    pub user_id: Uuid,
    pub display_name: String,
    pub category: Category,
    pub location: Option<Coordinate>,
    pub is_available: bool,
    pub is_active: bool,
    pub prices: serde_json::Value,
    pub rating_average: f64,
    pub review_count: u32,
}

impl ProfessionalRecord {
    /// Whether this record may appear in any search at all.
    #[must_use]
    pub fn is_searchable(&self) -> bool {
        self.is_active && self.is_available && self.location.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_canonical_names() {
        assert_eq!("BARBER".parse::<Category>(), Ok(Category::Barber));
        assert_eq!(
            "TATTOO_ARTIST".parse::<Category>(),
            Ok(Category::TattooArtist)
        );
        assert_eq!("MANICURIST".parse::<Category>(), Ok(Category::Manicurist));
    }

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!("barber".parse::<Category>(), Ok(Category::Barber));
        assert_eq!(
            "tattoo-artist".parse::<Category>(),
            Ok(Category::TattooArtist)
        );
    }

    #[test]
    fn category_rejects_unknown() {
        assert_eq!(
            "PLUMBER".parse::<Category>(),
            Err(ValidationError::UnknownCategory("PLUMBER".to_string()))
        );
    }

    #[test]
    fn category_serializes_screaming_snake() {
        let json = serde_json::to_string(&Category::TattooArtist).expect("serialize");
        assert_eq!(json, "\"TATTOO_ARTIST\"");
    }

    #[test]
    fn record_serializes_camel_case_with_nested_location() {
        let record = ProfessionalRecord {
            id: 4,
            user_id: Uuid::nil(),
            display_name: "Corte Fino".to_string(),
            category: Category::Barber,
            location: Some(Coordinate::new(-33.45, -70.66).expect("valid")),
            is_available: true,
            is_active: true,
            prices: serde_json::json!({"Cut": 15000}),
            rating_average: 4.2,
            review_count: 3,
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["displayName"], "Corte Fino");
        assert_eq!(json["location"]["latitude"], -33.45);
        assert_eq!(json["reviewCount"], 3);
        assert_eq!(json["category"], "BARBER");
    }

    #[test]
    fn display_matches_storage_spelling() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }
}
