use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::debug;
use utoipa::ToSchema;

use crate::{
    error::{ApiError, is_unique_violation},
    model::{attendance::Attendance, employee::Employee},
    validate::{self, EmployeeCandidate},
};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john@example.com", format = "email")]
    pub email: String,
    #[schema(example = "IT")]
    pub department: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub employee_id: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

async fn fetch_employee(pool: &SqlitePool, id: i64) -> Result<Employee, ApiError> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::NotFound("Employee"))
}

/// Validates the merged candidate and writes all four columns.
async fn store_employee(
    pool: &SqlitePool,
    id: i64,
    candidate: EmployeeCandidate<'_>,
) -> Result<Employee, ApiError> {
    validate::employee(pool, &candidate, Some(id)).await?;

    sqlx::query("UPDATE employees SET employee_id = ?, full_name = ?, email = ?, department = ? WHERE id = ?")
        .bind(candidate.employee_id)
        .bind(candidate.full_name)
        .bind(candidate.email)
        .bind(candidate.department)
        .bind(id)
        .execute(pool)
        .await
        .map_err(map_duplicate)?;

    fetch_employee(pool, id).await
}

fn map_duplicate(e: sqlx::Error) -> ApiError {
    if is_unique_violation(&e) {
        ApiError::conflict(
            "non_field_errors",
            "Employee with this employee id or email already exists.",
        )
    } else {
        ApiError::from(e)
    }
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = [Employee])
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let employees = sqlx::query_as::<_, Employee>("SELECT * FROM employees")
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(employees))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation failure", body = Object, example = json!({
            "employee_id": ["Employee with this employee id already exists."]
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let candidate = EmployeeCandidate {
        employee_id: &payload.employee_id,
        full_name: &payload.full_name,
        email: &payload.email,
        department: &payload.department,
    };
    validate::employee(pool.get_ref(), &candidate, None).await?;

    let result = sqlx::query(
        "INSERT INTO employees (employee_id, full_name, email, department) VALUES (?, ?, ?, ?)",
    )
    .bind(&payload.employee_id)
    .bind(&payload.full_name)
    .bind(&payload.email)
    .bind(&payload.department)
    .execute(pool.get_ref())
    .await
    .map_err(map_duplicate)?;

    let created = fetch_employee(pool.get_ref(), result.last_insert_rowid()).await?;
    debug!(employee_id = %created.employee_id, "employee created");

    Ok(HttpResponse::Created().json(created))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee row ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee not found."
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let employee = fetch_employee(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Replace Employee (full payload)
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee row ID")),
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee replaced", body = Employee),
        (status = 400, description = "Validation failure"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn replace_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    fetch_employee(pool.get_ref(), id).await?;

    let updated = store_employee(
        pool.get_ref(),
        id,
        EmployeeCandidate {
            employee_id: &payload.employee_id,
            full_name: &payload.full_name,
            email: &payload.email,
            department: &payload.department,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Patch Employee (absent fields stay untouched)
#[utoipa::path(
    patch,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee row ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Validation failure"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn patch_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<UpdateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let current = fetch_employee(pool.get_ref(), id).await?;

    let payload = payload.into_inner();
    let employee_id = payload.employee_id.unwrap_or(current.employee_id);
    let full_name = payload.full_name.unwrap_or(current.full_name);
    let email = payload.email.unwrap_or(current.email);
    let department = payload.department.unwrap_or(current.department);

    let updated = store_employee(
        pool.get_ref(),
        id,
        EmployeeCandidate {
            employee_id: &employee_id,
            full_name: &full_name,
            email: &email,
            department: &department,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Delete Employee (cascades to its attendance rows)
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee row ID")),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let affected = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await?
        .rows_affected();

    if affected == 0 {
        return Err(ApiError::NotFound("Employee"));
    }

    debug!(id, "employee deleted");
    Ok(HttpResponse::Ok().json(json!({ "message": "Successfully deleted" })))
}

/// List one employee's attendance records
#[utoipa::path(
    get,
    path = "/api/employees/{id}/attendances",
    params(("id", Path, description = "Employee row ID")),
    responses(
        (status = 200, description = "The employee's attendance rows", body = [Attendance]),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn list_employee_attendances(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    fetch_employee(pool.get_ref(), id).await?;

    let attendances = sqlx::query_as::<_, Attendance>("SELECT * FROM attendance WHERE employee_id = ?")
        .bind(id)
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(attendances))
}
