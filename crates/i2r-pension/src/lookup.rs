//! Pension lookup trait.

use crate::error::Result;
use async_trait::async_trait;

/// Resolves an employee name to a pension identifier.
///
/// Implementations make exactly one attempt per call and must be safe to call
/// concurrently from many futures.
#[async_trait]
pub trait PensionLookup: Send + Sync {
    /// Fetch the identifier for `name`.
    ///
    /// On success the service's body is returned verbatim.
    ///
    /// # Errors
    /// Returns `LookupError` on a non-success status, a transport failure or a
    /// timeout.
    async fn fetch(&self, name: &str) -> Result<String>;
}
