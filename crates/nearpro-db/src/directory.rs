//! Postgres-backed [`ProfessionalDirectory`].

use async_trait::async_trait;
use nearpro_core::{DataAccessError, DirectoryFilters, ProfessionalDirectory, ProfessionalRecord};
use sqlx::PgPool;

use crate::professionals::list_searchable_professionals;

#[derive(Debug, Clone)]
pub struct PgProfessionalDirectory {
    pool: PgPool,
}

impl PgProfessionalDirectory {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfessionalDirectory for PgProfessionalDirectory {
    async fn query_active_available_with_location(
        &self,
        filters: &DirectoryFilters,
    ) -> Result<Vec<ProfessionalRecord>, DataAccessError> {
        let rows = list_searchable_professionals(&self.pool, filters)
            .await
            .map_err(|e| DataAccessError::with_source("professionals query failed", e))?;

        rows.into_iter()
            .map(|row| {
                ProfessionalRecord::try_from(row)
                    .map_err(|e| DataAccessError::with_source("unreadable professional row", e))
            })
            .collect()
    }
}
