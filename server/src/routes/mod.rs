//! HTTP routes.

pub mod employees;
