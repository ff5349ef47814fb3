//! Employee record operations.
//!
//! CRUD functions over the `employees` table. Rows come back in identity
//! order, which is the store's natural iteration order.

use i2r_core::{Employee, EmployeeId, NewEmployee};
use sqlx::{Pool, Row, Sqlite};

/// Insert a new employee and return the stored record.
///
/// The store assigns the identity.
///
/// # Errors
/// Returns `sqlx::Error` if the database insert fails.
pub async fn insert_employee(
    pool: &Pool<Sqlite>,
    employee: NewEmployee,
    pension_id: String,
) -> Result<Employee, sqlx::Error> {
    let result = sqlx::query("INSERT INTO employees (name, pension_id, role) VALUES (?, ?, ?)")
        .bind(&employee.name)
        .bind(&pension_id)
        .bind(&employee.role)
        .execute(pool)
        .await?;

    let id = EmployeeId::from(result.last_insert_rowid());
    tracing::debug!("Inserted employee {}", id);

    Ok(Employee {
        id,
        name: employee.name,
        pension_id,
        role: employee.role,
    })
}

/// Get all employees ordered by identity.
///
/// # Errors
/// Returns `sqlx::Error` if the database query fails.
pub async fn get_all(pool: &Pool<Sqlite>) -> Result<Vec<Employee>, sqlx::Error> {
    let rows = sqlx::query("SELECT id, name, pension_id, role FROM employees ORDER BY id")
        .fetch_all(pool)
        .await?;

    rows.iter().map(employee_from_row).collect()
}

/// Get an employee by identity.
///
/// # Errors
/// Returns `sqlx::Error` if the database query fails.
pub async fn get_by_id(
    pool: &Pool<Sqlite>,
    id: EmployeeId,
) -> Result<Option<Employee>, sqlx::Error> {
    let row = sqlx::query("SELECT id, name, pension_id, role FROM employees WHERE id = ?")
        .bind(id.get())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(employee_from_row).transpose()
}

/// Write every record in a single transaction, keyed by identity.
///
/// Existing rows are overwritten in full; identities with no row are inserted
/// with that identity. Either every record is written or none is.
///
/// # Errors
/// Returns `sqlx::Error` if any write fails; the transaction is rolled back.
pub async fn upsert_all(
    pool: &Pool<Sqlite>,
    employees: Vec<Employee>,
) -> Result<Vec<Employee>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    for employee in &employees {
        sqlx::query(
            r"
            INSERT INTO employees (id, name, pension_id, role)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                pension_id = excluded.pension_id,
                role = excluded.role
            ",
        )
        .bind(employee.id.get())
        .bind(&employee.name)
        .bind(&employee.pension_id)
        .bind(&employee.role)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::debug!("Saved {} employees", employees.len());

    Ok(employees)
}

fn employee_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Employee, sqlx::Error> {
    Ok(Employee {
        id: EmployeeId::from(row.try_get::<i64, _>("id")?),
        name: row.try_get("name")?,
        pension_id: row.try_get("pension_id")?,
        role: row.try_get("role")?,
    })
}
