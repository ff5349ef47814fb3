//! Read accessors over the record store.

use crate::error::{EnrichmentError, Result};
use i2r_core::{Employee, EmployeeId};
use i2r_db::EmployeeStore;
use std::sync::Arc;

/// Lists and fetches employee records.
pub struct EmployeeDirectory {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeDirectory {
    /// Create a directory over a record store.
    #[must_use]
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    /// Every record, in store order.
    pub async fn list_all(&self) -> Result<Vec<Employee>> {
        Ok(self.store.find_all().await?)
    }

    /// The record with this identity.
    ///
    /// # Errors
    /// Returns `EnrichmentError::NotFound` if no record has the identity.
    pub async fn get_by_id(&self, id: EmployeeId) -> Result<Employee> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(EnrichmentError::NotFound(id))
    }
}
