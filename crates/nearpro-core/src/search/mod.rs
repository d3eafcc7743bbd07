//! Proximity search: which available professionals are near a point.

mod directory;
mod memory;
mod query;
mod service;

pub use directory::{DirectoryFilters, ProfessionalDirectory};
pub use memory::InMemoryDirectory;
pub use query::{SearchQuery, DEFAULT_RADIUS_METERS, MIN_RADIUS_METERS};
pub use service::{ProximitySearchService, SearchResult, MAX_RESULTS};
