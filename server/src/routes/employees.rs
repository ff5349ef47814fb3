//! Employee routes.
//!
//! Thin handlers that dispatch to the enrichment engine, the problem scanner
//! and the read accessors.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use i2r_core::{Employee, EmployeeId, NewEmployee};
use std::sync::Arc;

/// Routes under `/employees`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/problems", get(list_problems))
        .route("/employees/pension", get(refresh_pensions))
        .route("/employees/:id", get(get_employee))
}

/// List all employees.
async fn list_employees(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.directory.list_all().await?))
}

/// Get a single employee by id.
async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, ApiError> {
    Ok(Json(state.directory.get_by_id(EmployeeId::from(id)).await?))
}

/// List records that fail the data-quality rules.
async fn list_problems(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.scanner.find_problems().await?))
}

/// Create an employee, looking up their pension id.
async fn create_employee(
    State(state): State<Arc<AppState>>,
    Json(employee): Json<NewEmployee>,
) -> Result<Json<Employee>, ApiError> {
    Ok(Json(state.engine.create_employee(employee).await?))
}

/// Refresh every employee's pension id.
async fn refresh_pensions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.engine.refresh_all_pensions().await?))
}
