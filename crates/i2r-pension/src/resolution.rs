//! Outcome of a single pension lookup.

use crate::error::LookupError;

/// Either a resolved identifier or the reason none is available.
///
/// Lookup failures are carried as data so they can be settled at the call
/// site; [`PensionResolution::into_pension_id`] applies the empty-string
/// fallback.
#[derive(Debug)]
pub enum PensionResolution {
    /// The service returned an identifier
    Resolved(String),
    /// No identifier is available
    Unresolved(LookupError),
}

impl PensionResolution {
    /// Whether an identifier was obtained.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The identifier, or the empty string when unresolved.
    #[must_use]
    pub fn into_pension_id(self) -> String {
        match self {
            Self::Resolved(id) => id,
            Self::Unresolved(_) => String::new(),
        }
    }
}

impl From<crate::Result<String>> for PensionResolution {
    fn from(result: crate::Result<String>) -> Self {
        match result {
            Ok(id) => Self::Resolved(id),
            Err(e) => Self::Unresolved(e),
        }
    }
}
