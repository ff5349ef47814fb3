//! i2r Pension - client for the external pension lookup service.
//!
//! The service resolves an employee name to a plain-text pension identifier.
//! This crate provides:
//!
//! - [`PensionLookup`] - the lookup seam, one best-effort attempt per call
//! - [`HttpPensionLookup`] - `reqwest` implementation with a bounded timeout
//! - [`PensionResolution`] - a lookup outcome carried as data
//!
//! # Example
//!
//! ```rust,ignore
//! use i2r_pension::{HttpPensionLookup, PensionLookup, PensionResolution};
//! use std::time::Duration;
//!
//! let lookup = HttpPensionLookup::new("http://localhost:8082", Duration::from_secs(5))?;
//! let pension_id = PensionResolution::from(lookup.fetch("Alice").await).into_pension_id();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod http;
pub mod lookup;
pub mod resolution;

// Re-export commonly used types
pub use error::{LookupError, Result};
pub use http::HttpPensionLookup;
pub use lookup::PensionLookup;
pub use resolution::PensionResolution;
