use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::DataAccessError;
use crate::professional::ProfessionalRecord;

use super::directory::{DirectoryFilters, ProfessionalDirectory};

/// Directory backed by a `Vec`, for tests and local tooling.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    records: RwLock<Vec<ProfessionalRecord>>,
    unavailable: AtomicBool,
}

impl InMemoryDirectory {
    #[must_use]
    pub fn new(records: Vec<ProfessionalRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Add or replace (by `id`) a record.
    ///
    /// # Errors
    ///
    /// Returns [`DataAccessError`] if the store lock is poisoned.
    pub fn upsert(&self, record: ProfessionalRecord) -> Result<(), DataAccessError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| DataAccessError::new("in-memory directory lock poisoned"))?;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        Ok(())
    }

    /// Make every subsequent query fail, simulating a storage outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProfessionalDirectory for InMemoryDirectory {
    async fn query_active_available_with_location(
        &self,
        filters: &DirectoryFilters,
    ) -> Result<Vec<ProfessionalRecord>, DataAccessError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DataAccessError::new("in-memory directory is unavailable"));
        }

        let records = self
            .records
            .read()
            .map_err(|_| DataAccessError::new("in-memory directory lock poisoned"))?;

        Ok(records
            .iter()
            .filter(|r| r.is_searchable())
            .filter(|r| filters.category.is_none_or(|c| r.category == c))
            .filter(|r| {
                filters
                    .min_rating_floor
                    .is_none_or(|floor| r.rating_average >= floor)
            })
            .filter(|r| match (filters.bounds, r.location) {
                (Some(bounds), Some(location)) => bounds.contains(location),
                _ => true,
            })
            .cloned()
            .collect())
    }
}
