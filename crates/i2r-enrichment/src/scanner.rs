//! Problem record detection.
//!
//! A record is healthy when its name, pension id and role are all non-empty
//! and its name starts with an uppercase letter. Everything else is a problem.

use crate::error::Result;
use i2r_core::Employee;
use i2r_db::EmployeeStore;
use std::sync::Arc;

/// One failed data-quality rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Defect {
    /// Name is empty
    MissingName,
    /// Pension id is empty (unresolved)
    MissingPensionId,
    /// Role is empty
    MissingRole,
    /// Name starts with a lowercase letter
    LowercaseName,
}

impl Defect {
    /// All rules, in the order they are checked.
    pub const ALL: [Self; 4] = [
        Self::MissingName,
        Self::MissingPensionId,
        Self::MissingRole,
        Self::LowercaseName,
    ];
}

/// Whether a record fails any data-quality rule.
///
/// An empty name is a problem on its own and short-circuits the first
/// character check.
pub fn is_problem(employee: &Employee) -> bool {
    employee.name.is_empty()
        || employee.pension_id.is_empty()
        || employee.role.is_empty()
        || starts_lowercase(&employee.name)
}

/// Every rule a record fails, in rule order.
pub fn defects(employee: &Employee) -> Vec<Defect> {
    let mut found = Vec::new();

    if employee.name.is_empty() {
        found.push(Defect::MissingName);
    }
    if employee.pension_id.is_empty() {
        found.push(Defect::MissingPensionId);
    }
    if employee.role.is_empty() {
        found.push(Defect::MissingRole);
    }
    if starts_lowercase(&employee.name) {
        found.push(Defect::LowercaseName);
    }

    found
}

/// How many records fail each rule, in rule order. Rules nobody fails are
/// left out.
pub fn defect_counts(employees: &[Employee]) -> Vec<(Defect, usize)> {
    let mut counts = [0usize; Defect::ALL.len()];
    for defect in employees.iter().flat_map(defects) {
        if let Some(slot) = Defect::ALL.iter().position(|d| *d == defect) {
            counts[slot] += 1;
        }
    }

    Defect::ALL
        .into_iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .collect()
}

fn starts_lowercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_lowercase)
}

/// Read-only scan of the record store for problem records.
pub struct ProblemScanner {
    store: Arc<dyn EmployeeStore>,
}

impl ProblemScanner {
    /// Create a scanner over a record store.
    #[must_use]
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    /// Records failing any rule, in store order.
    pub async fn find_problems(&self) -> Result<Vec<Employee>> {
        let candidates = self.store.find_all().await?;
        let total = candidates.len();

        let problems: Vec<Employee> = candidates.into_iter().filter(is_problem).collect();

        tracing::debug!(
            "Problem scan flagged {} of {} records: {:?}",
            problems.len(),
            total,
            defect_counts(&problems)
        );
        Ok(problems)
    }
}
