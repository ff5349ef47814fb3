use i2r_core::EmployeeId;
use i2r_db::DatabaseError;
use thiserror::Error;

/// Errors that cross the enrichment boundary.
///
/// Pension lookup failures never appear here; they are settled inside the
/// engine as an empty identifier.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("Could not find employee {0}")]
    NotFound(EmployeeId),

    #[error("Record store error: {0}")]
    Database(#[from] DatabaseError),
}

pub type Result<T> = std::result::Result<T, EnrichmentError>;
