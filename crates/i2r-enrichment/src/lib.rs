//! i2r Enrichment - pension enrichment and problem detection.
//!
//! This crate holds the behavior of the service: it resolves pension ids
//! through the external lookup service, degrading to an empty id when the
//! service is unavailable, and it scans records for data-quality defects.
//!
//! # Features
//!
//! - Sequential or bounded concurrent fan-out of per-employee lookups
//! - Per-lookup timeout mapped to the empty-id fallback
//! - Single batched write after every lookup has finished
//! - Pure problem-record predicate with per-rule reporting
//!
//! # Example
//!
//! ```rust,ignore
//! use i2r_enrichment::{EnrichmentEngine, ProblemScanner};
//! use std::sync::Arc;
//!
//! let engine = EnrichmentEngine::new(store.clone(), Arc::new(lookup));
//! let refreshed = engine.refresh_all_pensions().await?;
//! let problems = ProblemScanner::new(store).find_problems().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod directory;
pub mod engine;
#[allow(missing_docs)]
pub mod error;
pub mod scanner;

// Re-export commonly used types
pub use directory::EmployeeDirectory;
pub use engine::EnrichmentEngine;
pub use error::{EnrichmentError, Result};
pub use scanner::{defect_counts, defects, is_problem, Defect, ProblemScanner};
