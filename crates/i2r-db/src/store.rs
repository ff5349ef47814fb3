//! The record store seam used by the enrichment engine.

use crate::error::Result;
use crate::{employees, Database};
use async_trait::async_trait;
use i2r_core::{Employee, EmployeeId, NewEmployee};

/// Persistence contract over employee records.
///
/// Implementations own record identity. Callers only ever hold copies.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Every record, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<Employee>>;

    /// The record with this identity, if any.
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>>;

    /// Store a new record and return it with its assigned identity.
    async fn save(&self, employee: NewEmployee, pension_id: String) -> Result<Employee>;

    /// Store every record as one batch. No record is partially written.
    async fn save_all(&self, employees: Vec<Employee>) -> Result<Vec<Employee>>;
}

#[async_trait]
impl EmployeeStore for Database {
    async fn find_all(&self) -> Result<Vec<Employee>> {
        Ok(employees::get_all(self.pool()).await?)
    }

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>> {
        Ok(employees::get_by_id(self.pool(), id).await?)
    }

    async fn save(&self, employee: NewEmployee, pension_id: String) -> Result<Employee> {
        Ok(employees::insert_employee(self.pool(), employee, pension_id).await?)
    }

    async fn save_all(&self, employees: Vec<Employee>) -> Result<Vec<Employee>> {
        Ok(employees::upsert_all(self.pool(), employees).await?)
    }
}
