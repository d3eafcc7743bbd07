//! Database operations for the `professionals` table.

mod read;
mod types;
mod write;

pub use read::{get_professional, list_searchable_professionals};
pub use types::{NewProfessional, ProfessionalRow};
pub use write::{deactivate_professional, set_availability, set_location, upsert_professional};
