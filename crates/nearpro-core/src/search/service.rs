use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::error::DataAccessError;
use crate::geo::{distance_meters, BoundingBox};
use crate::pricing::{min_price, normalize_price_map};
use crate::professional::{Category, ProfessionalRecord};

use super::directory::{DirectoryFilters, ProfessionalDirectory};
use super::query::SearchQuery;

/// Hard cap on rows returned by a single search.
pub const MAX_RESULTS: usize = 50;

/// One professional in a search response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: i64,
    pub user_id: Uuid,
    pub display_name: String,
    pub category: Category,
    pub latitude: f64,
    pub longitude: f64,
    pub is_available: bool,
    pub rating_average: f64,
    pub review_count: u32,
    pub prices: BTreeMap<String, Decimal>,
    pub distance_meters: u32,
}

/// Finds available professionals near a point.
#[derive(Clone)]
pub struct ProximitySearchService {
    directory: Arc<dyn ProfessionalDirectory>,
}

impl std::fmt::Debug for ProximitySearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProximitySearchService").finish_non_exhaustive()
    }
}

impl ProximitySearchService {
    #[must_use]
    pub fn new(directory: Arc<dyn ProfessionalDirectory>) -> Self {
        Self { directory }
    }

    /// Professionals within the query radius, nearest first, at most
    /// [`MAX_RESULTS`] of them.
    ///
    /// Equal distances are ordered by record id. An empty result is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`DataAccessError`] if the directory cannot be queried.
    pub async fn find_nearby(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<SearchResult>, DataAccessError> {
        let filters = DirectoryFilters {
            category: query.category(),
            min_rating_floor: query.min_rating(),
            bounds: BoundingBox::around(query.origin(), query.radius_meters()),
        };

        let candidates = self
            .directory
            .query_active_available_with_location(&filters)
            .await?;
        let candidate_count = candidates.len();

        let mut results: Vec<SearchResult> = candidates
            .into_iter()
            .filter_map(|record| evaluate(query, record))
            .collect();
        let matched = results.len();

        results.sort_by(|a, b| {
            a.distance_meters
                .cmp(&b.distance_meters)
                .then_with(|| a.id.cmp(&b.id))
        });
        results.truncate(MAX_RESULTS);

        tracing::debug!(
            candidates = candidate_count,
            matched,
            returned = results.len(),
            radius_meters = query.radius_meters(),
            "proximity search complete"
        );

        Ok(results)
    }
}

/// Apply every query predicate to one candidate.
///
/// The directory already narrows on the cheap predicates; they are checked
/// again here so results hold regardless of which directory is plugged in.
fn evaluate(query: &SearchQuery, record: ProfessionalRecord) -> Option<SearchResult> {
    if !record.is_active || !record.is_available {
        return None;
    }
    let location = record.location?;

    if query.category().is_some_and(|c| record.category != c) {
        return None;
    }
    if query
        .min_rating()
        .is_some_and(|floor| record.rating_average < floor)
    {
        return None;
    }

    let distance = distance_meters(query.origin(), location);
    if distance > query.radius_meters() {
        return None;
    }

    let prices = normalize_price_map(&record.prices);
    if let Some(ceiling) = query.max_price() {
        match min_price(&prices) {
            Some(cheapest) if cheapest <= ceiling => {}
            _ => return None,
        }
    }

    Some(SearchResult {
        id: record.id,
        user_id: record.user_id,
        display_name: record.display_name,
        category: record.category,
        latitude: location.latitude(),
        longitude: location.longitude(),
        is_available: record.is_available,
        rating_average: record.rating_average,
        review_count: record.review_count,
        prices,
        distance_meters: distance,
    })
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
