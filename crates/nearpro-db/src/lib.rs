//! Postgres persistence for professional profiles.

pub mod directory;
pub mod error;
pub mod migrate;
pub mod pool;
pub mod professionals;
pub mod seed;

pub use directory::PgProfessionalDirectory;
pub use error::DbError;
pub use migrate::run_migrations;
pub use pool::{connect_pool, ping, PoolConfig};
pub use professionals::{
    deactivate_professional, get_professional, list_searchable_professionals, set_availability,
    set_location, upsert_professional, NewProfessional, ProfessionalRow,
};
pub use seed::seed_professionals;
