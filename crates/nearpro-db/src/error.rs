use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("record not found")]
    NotFound,
    #[error("malformed row {id}: {reason}")]
    MalformedRow { id: i64, reason: String },
    #[error("{field} value {value} does not fit its column")]
    OutOfRange { field: &'static str, value: u64 },
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}
