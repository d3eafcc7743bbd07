use async_trait::async_trait;

use crate::error::DataAccessError;
use crate::geo::BoundingBox;
use crate::professional::{Category, ProfessionalRecord};

/// Cheap predicates a directory applies before records reach the search core.
///
/// `bounds`, when set, is always a superset of the search circle; a directory
/// may ignore it without changing results.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DirectoryFilters {
    pub category: Option<Category>,
    pub min_rating_floor: Option<f64>,
    pub bounds: Option<BoundingBox>,
}

/// Storage of professional profiles, queried by the search service.
#[async_trait]
pub trait ProfessionalDirectory: Send + Sync {
    /// Return every record that is active, available and has a location,
    /// narrowed by `filters`.
    async fn query_active_available_with_location(
        &self,
        filters: &DirectoryFilters,
    ) -> Result<Vec<ProfessionalRecord>, DataAccessError>;
}
