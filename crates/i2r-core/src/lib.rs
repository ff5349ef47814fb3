//! i2r Core - Foundation crate for the i2r employee records service.
//!
//! This crate provides the shared record shape, error handling and
//! configuration management that all other i2r crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Employee record types (`Employee`, `NewEmployee`, `EmployeeId`)
//!
//! # Example
//!
//! ```rust
//! use i2r_core::{AppConfig, Employee, EmployeeId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! config.validate()?;
//!
//! let alice = Employee::new(EmployeeId::from(1), "Alice", "", "Engineer");
//! let alice = alice.with_pension_id("P100");
//! assert_eq!(alice.pension_id, "P100");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, DatabaseConfig, PensionConfig, RefreshStrategy, ServerConfig};
pub use error::{ConfigError, ConfigResult, I2rError, Result};
pub use types::{Employee, EmployeeId, NewEmployee};
