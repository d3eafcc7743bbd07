use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ConfigError, ValidationError};
use crate::geo::Coordinate;
use crate::pricing::PriceEntry;
use crate::professional::Category;

fn default_true() -> bool {
    true
}

/// One professional profile in the seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfessionalSeed {
    pub user_id: Uuid,
    pub display_name: String,
    pub category: Category,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default = "default_true")]
    pub available: bool,
    /// Service name → bare number or `{price, duration}`.
    #[serde(default)]
    pub prices: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub rating_average: f64,
    #[serde(default)]
    pub review_count: u32,
}

impl ProfessionalSeed {
    /// The seed's location, if both coordinates are present.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a coordinate is out of range.
    pub fn location(&self) -> Result<Option<Coordinate>, ValidationError> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon).map(Some),
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SeedFile {
    pub professionals: Vec<ProfessionalSeed>,
}

/// Load and validate professional seed data from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_seed_file(path: &Path) -> Result<SeedFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SeedFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_seed_file(&content)
}

/// Parse and validate seed YAML already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_seed_file(content: &str) -> Result<SeedFile, ConfigError> {
    let seed_file: SeedFile = serde_yaml::from_str(content)?;
    validate_seed(&seed_file)?;
    Ok(seed_file)
}

fn validate_seed(seed_file: &SeedFile) -> Result<(), ConfigError> {
    let mut seen_users = HashSet::new();

    for pro in &seed_file.professionals {
        if pro.display_name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "professional {} has an empty display name",
                pro.user_id
            )));
        }

        if !seen_users.insert(pro.user_id) {
            return Err(ConfigError::Validation(format!(
                "duplicate user_id: {}",
                pro.user_id
            )));
        }

        if pro.latitude.is_some() != pro.longitude.is_some() {
            return Err(ConfigError::Validation(format!(
                "'{}' must set both latitude and longitude or neither",
                pro.display_name
            )));
        }

        pro.location().map_err(|e| {
            ConfigError::Validation(format!("'{}' has a bad location: {e}", pro.display_name))
        })?;

        if !(0.0..=5.0).contains(&pro.rating_average) {
            return Err(ConfigError::Validation(format!(
                "'{}' has rating {} outside [0, 5]",
                pro.display_name, pro.rating_average
            )));
        }

        if i32::try_from(pro.review_count).is_err() {
            return Err(ConfigError::Validation(format!(
                "'{}' has review_count {} above {}",
                pro.display_name,
                pro.review_count,
                i32::MAX
            )));
        }

        for (service, value) in &pro.prices {
            if PriceEntry::parse(value).is_none() {
                return Err(ConfigError::Validation(format!(
                    "'{}' has an unreadable price for \"{service}\"",
                    pro.display_name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r"
professionals:
  - user_id: 7f9c1a52-3b7e-4d8e-9a43-0c6b1f0b2a11
    display_name: Corte Fino
    category: BARBER
    latitude: -33.4489
    longitude: -70.6693
    prices:
      Cut: 15000
      Beard:
        price: 8000
        duration: 20
    rating_average: 4.7
    review_count: 58
  - user_id: 1d2e3f40-5a6b-4c7d-8e9f-0a1b2c3d4e5f
    display_name: Tinta Sur
    category: TATTOO_ARTIST
    available: false
";

    #[test]
    fn parses_valid_seed() {
        let seed = parse_seed_file(VALID).expect("valid seed");
        assert_eq!(seed.professionals.len(), 2);

        let barber = &seed.professionals[0];
        assert_eq!(barber.category, Category::Barber);
        assert!(barber.available);
        assert_eq!(barber.prices.len(), 2);
        assert!(barber.location().expect("in range").is_some());

        let tattoo = &seed.professionals[1];
        assert!(!tattoo.available);
        assert!(tattoo.location().expect("absent is fine").is_none());
        assert_eq!(tattoo.review_count, 0);
    }

    #[test]
    fn bundled_sample_seed_is_valid() {
        let seed = parse_seed_file(include_str!("../../../config/professionals.yaml"))
            .expect("bundled seed should validate");
        assert!(seed
            .professionals
            .iter()
            .any(|p| p.category == Category::TattooArtist));
    }

    #[test]
    fn rejects_review_count_beyond_storage() {
        let yaml = r"
professionals:
  - user_id: 7f9c1a52-3b7e-4d8e-9a43-0c6b1f0b2a11
    display_name: Popular
    category: BARBER
    review_count: 3000000000
";
        let err = parse_seed_file(yaml).unwrap_err();
        assert!(err.to_string().contains("review_count 3000000000"), "{err}");
    }

    #[test]
    fn rejects_duplicate_user_ids() {
        let yaml = r"
professionals:
  - user_id: 7f9c1a52-3b7e-4d8e-9a43-0c6b1f0b2a11
    display_name: One
    category: BARBER
  - user_id: 7f9c1a52-3b7e-4d8e-9a43-0c6b1f0b2a11
    display_name: Two
    category: MANICURIST
";
        let err = parse_seed_file(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate user_id"), "{err}");
    }

    #[test]
    fn rejects_half_a_location() {
        let yaml = r"
professionals:
  - user_id: 7f9c1a52-3b7e-4d8e-9a43-0c6b1f0b2a11
    display_name: Lost
    category: BARBER
    latitude: -33.0
";
        let err = parse_seed_file(yaml).unwrap_err();
        assert!(err.to_string().contains("both latitude and longitude"), "{err}");
    }

    #[test]
    fn rejects_out_of_range_location() {
        let yaml = r"
professionals:
  - user_id: 7f9c1a52-3b7e-4d8e-9a43-0c6b1f0b2a11
    display_name: Offworld
    category: BARBER
    latitude: 120.0
    longitude: 0.0
";
        let err = parse_seed_file(yaml).unwrap_err();
        assert!(err.to_string().contains("bad location"), "{err}");
    }

    #[test]
    fn rejects_unreadable_price() {
        let yaml = r"
professionals:
  - user_id: 7f9c1a52-3b7e-4d8e-9a43-0c6b1f0b2a11
    display_name: Vague
    category: MANICURIST
    prices:
      Nails: ask me
";
        let err = parse_seed_file(yaml).unwrap_err();
        assert!(err.to_string().contains("\"Nails\""), "{err}");
    }

    #[test]
    fn rejects_unknown_category() {
        let yaml = r"
professionals:
  - user_id: 7f9c1a52-3b7e-4d8e-9a43-0c6b1f0b2a11
    display_name: Plumber Bob
    category: PLUMBER
";
        assert!(matches!(
            parse_seed_file(yaml),
            Err(ConfigError::SeedFileParse(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_seed_file(Path::new("/nonexistent/professionals.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::SeedFileIo { ref path, .. } if path.contains("nonexistent")));
    }
}
