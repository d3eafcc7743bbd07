//! Domain core for the nearpro marketplace: professional profiles, geo math,
//! price normalization, and proximity search over an injected directory.

pub mod app_config;
pub mod config;
pub mod error;
pub mod geo;
pub mod pricing;
pub mod professional;
pub mod search;
pub mod seed;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, DataAccessError, ValidationError};
pub use geo::{distance_meters, haversine_meters, BoundingBox, Coordinate, EARTH_RADIUS_METERS};
pub use pricing::{min_price, normalize_price_map, PriceEntry};
pub use professional::{Category, ProfessionalRecord};
pub use search::{
    DirectoryFilters, InMemoryDirectory, ProfessionalDirectory, ProximitySearchService,
    SearchQuery, SearchResult, DEFAULT_RADIUS_METERS, MAX_RESULTS, MIN_RADIUS_METERS,
};
pub use seed::{load_seed_file, parse_seed_file, ProfessionalSeed, SeedFile};
