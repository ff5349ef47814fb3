//! Employee record types shared across the i2r service.
//!
//! Records are plain values. The store owns identity and storage; every other
//! component works on transient copies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned employee identity.
///
/// Identities are opaque to the core: they are assigned once by the record
/// store on creation and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(i64);

impl EmployeeId {
    /// Get the raw identity value.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for EmployeeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored employee record.
///
/// An empty `pension_id` means the identifier is unresolved. None of the text
/// fields are validated on write; see the problem scanner for the data-quality
/// rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Store-assigned identity
    pub id: EmployeeId,
    /// Display name, conventionally capitalized
    pub name: String,
    /// Pension identifier, empty when unresolved
    pub pension_id: String,
    /// Job role
    pub role: String,
}

impl Employee {
    /// Create a record value with an existing identity.
    #[must_use]
    pub fn new(
        id: EmployeeId,
        name: impl Into<String>,
        pension_id: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            pension_id: pension_id.into(),
            role: role.into(),
        }
    }

    /// Return a copy of this record carrying a new pension identifier.
    #[must_use]
    pub fn with_pension_id(self, pension_id: impl Into<String>) -> Self {
        Self {
            pension_id: pension_id.into(),
            ..self
        }
    }

    /// Whether the pension identifier has been resolved.
    #[must_use]
    pub fn has_pension_id(&self) -> bool {
        !self.pension_id.is_empty()
    }
}

/// Input for creating an employee.
///
/// Missing fields deserialize as empty strings. A `pensionId` supplied by the
/// caller is ignored, since creation always resolves it through a lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewEmployee {
    /// Display name
    pub name: String,
    /// Job role
    pub role: String,
}

impl NewEmployee {
    /// Create a new employee input.
    #[must_use]
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_serializes_camel_case() {
        let employee = Employee::new(EmployeeId::from(7), "Alice", "P100", "Engineer");
        let json = serde_json::to_value(&employee).expect("serialize employee");

        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "name": "Alice",
                "pensionId": "P100",
                "role": "Engineer"
            })
        );
    }

    #[test]
    fn test_with_pension_id_keeps_identity() {
        let employee = Employee::new(EmployeeId::from(3), "Bob", "", "Clerk");
        assert!(!employee.has_pension_id());

        let updated = employee.with_pension_id("P42");
        assert_eq!(updated.id, EmployeeId::from(3));
        assert_eq!(updated.name, "Bob");
        assert_eq!(updated.role, "Clerk");
        assert_eq!(updated.pension_id, "P42");
        assert!(updated.has_pension_id());
    }

    #[test]
    fn test_new_employee_ignores_pension_id_and_defaults_missing_fields() {
        let input: NewEmployee =
            serde_json::from_str(r#"{"name":"Carol","pensionId":"bogus"}"#).expect("parse input");
        assert_eq!(input, NewEmployee::new("Carol", ""));
    }

    #[test]
    fn test_employee_id_display() {
        assert_eq!(EmployeeId::from(999).to_string(), "999");
        assert_eq!(EmployeeId::from(999).get(), 999);
    }
}
