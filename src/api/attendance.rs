use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::debug;
use utoipa::ToSchema;

use crate::{
    error::{ApiError, is_unique_violation},
    model::attendance::{Attendance, AttendanceStatus},
    validate,
};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateAttendance {
    /// Primary key of the owning employee row.
    #[schema(example = 1)]
    pub employee: i64,
    #[schema(example = "2023-10-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAttendance {
    pub employee: Option<i64>,
    #[schema(example = "2023-10-01", value_type = String, format = "date")]
    pub date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttendanceQuery {
    pub employee_id: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

async fn fetch_attendance(pool: &SqlitePool, id: i64) -> Result<Attendance, ApiError> {
    sqlx::query_as::<_, Attendance>("SELECT * FROM attendance WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::NotFound("Attendance record"))
}

fn map_duplicate(e: sqlx::Error) -> ApiError {
    if is_unique_violation(&e) {
        ApiError::conflict(
            "non_field_errors",
            "The fields employee, date must make a unique set.",
        )
    } else {
        ApiError::from(e)
    }
}

async fn store_attendance(
    pool: &SqlitePool,
    id: i64,
    employee: i64,
    date: NaiveDate,
    status: AttendanceStatus,
) -> Result<Attendance, ApiError> {
    validate::attendance(pool, employee, date, Some(id)).await?;

    sqlx::query("UPDATE attendance SET employee_id = ?, date = ?, status = ? WHERE id = ?")
        .bind(employee)
        .bind(date)
        .bind(status)
        .bind(id)
        .execute(pool)
        .await
        .map_err(map_duplicate)?;

    fetch_attendance(pool, id).await
}

/// List Attendance with optional filters
#[utoipa::path(
    get,
    path = "/api/attendances",
    params(
        ("employee_id" = Option<String>, Query, description = "Exact business employee id, e.g. EMP001"),
        ("date_from" = Option<String>, Query, description = "Inclusive lower date bound (YYYY-MM-DD)"),
        ("date_to" = Option<String>, Query, description = "Inclusive upper date bound (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Matching attendance rows", body = [Attendance]),
        (status = 400, description = "Malformed date parameter")
    ),
    tag = "Attendance"
)]
pub async fn list_attendances(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    // Conditions combine with AND; dates are stored as ISO-8601 TEXT, so
    // lexicographic comparison is date comparison.
    let mut conditions = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(employee_id) = &query.employee_id {
        conditions.push("e.employee_id = ?");
        bindings.push(employee_id.clone());
    }
    if let Some(date_from) = query.date_from {
        conditions.push("a.date >= ?");
        bindings.push(date_from.to_string());
    }
    if let Some(date_to) = query.date_to {
        conditions.push("a.date <= ?");
        bindings.push(date_to.to_string());
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT a.id, a.employee_id, a.date, a.status FROM attendance a \
         JOIN employees e ON e.id = a.employee_id {}",
        where_clause
    );
    debug!(sql = %sql, bindings = ?bindings, "listing attendance");

    let mut data_query = sqlx::query_as::<_, Attendance>(&sql);
    for b in &bindings {
        data_query = data_query.bind(b);
    }

    let rows = data_query.fetch_all(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Create Attendance
#[utoipa::path(
    post,
    path = "/api/attendances",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance created", body = Attendance),
        (status = 400, description = "Validation failure", body = Object, example = json!({
            "non_field_errors": ["The fields employee, date must make a unique set."]
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn create_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateAttendance>,
) -> Result<HttpResponse, ApiError> {
    validate::attendance(pool.get_ref(), payload.employee, payload.date, None).await?;

    let result = sqlx::query("INSERT INTO attendance (employee_id, date, status) VALUES (?, ?, ?)")
        .bind(payload.employee)
        .bind(payload.date)
        .bind(payload.status)
        .execute(pool.get_ref())
        .await
        .map_err(map_duplicate)?;

    let created = fetch_attendance(pool.get_ref(), result.last_insert_rowid()).await?;
    debug!(employee = created.employee, date = %created.date, "attendance created");

    Ok(HttpResponse::Created().json(created))
}

/// Get Attendance by ID
#[utoipa::path(
    get,
    path = "/api/attendances/{id}",
    params(("id", Path, description = "Attendance row ID")),
    responses(
        (status = 200, description = "Attendance found", body = Attendance),
        (status = 404, description = "Attendance record not found", body = Object, example = json!({
            "detail": "Attendance record not found."
        }))
    ),
    tag = "Attendance"
)]
pub async fn get_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let attendance = fetch_attendance(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(attendance))
}

/// Replace Attendance (full payload)
#[utoipa::path(
    put,
    path = "/api/attendances/{id}",
    params(("id", Path, description = "Attendance row ID")),
    request_body = CreateAttendance,
    responses(
        (status = 200, description = "Attendance replaced", body = Attendance),
        (status = 400, description = "Validation failure"),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn replace_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<CreateAttendance>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    fetch_attendance(pool.get_ref(), id).await?;

    let updated = store_attendance(
        pool.get_ref(),
        id,
        payload.employee,
        payload.date,
        payload.status,
    )
    .await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Patch Attendance (absent fields stay untouched)
#[utoipa::path(
    patch,
    path = "/api/attendances/{id}",
    params(("id", Path, description = "Attendance row ID")),
    request_body = UpdateAttendance,
    responses(
        (status = 200, description = "Attendance updated", body = Attendance),
        (status = 400, description = "Validation failure"),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn patch_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<UpdateAttendance>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let current = fetch_attendance(pool.get_ref(), id).await?;

    let payload = payload.into_inner();
    let employee = payload.employee.unwrap_or(current.employee);
    let date = payload.date.unwrap_or(current.date);
    let status = payload.status.unwrap_or(current.status);

    let updated = store_attendance(pool.get_ref(), id, employee, date, status).await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Delete Attendance
#[utoipa::path(
    delete,
    path = "/api/attendances/{id}",
    params(("id", Path, description = "Attendance row ID")),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let affected = sqlx::query("DELETE FROM attendance WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await?
        .rows_affected();

    if affected == 0 {
        return Err(ApiError::NotFound("Attendance record"));
    }

    debug!(id, "attendance deleted");
    Ok(HttpResponse::Ok().json(json!({ "message": "Successfully deleted" })))
}
