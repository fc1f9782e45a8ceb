use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::SqlitePool;

use crate::error::{ApiError, ValidationErrors};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_RE.is_match(candidate)
}

/// Fully merged employee payload, ready to be checked as a whole.
pub struct EmployeeCandidate<'a> {
    pub employee_id: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
    pub department: &'a str,
}

/// Rejects the candidate if a required field is blank, the email shape is off,
/// or `employee_id`/`email` collide with a different row. `exclude_id` is the
/// row being updated, so it never collides with itself.
pub async fn employee(
    pool: &SqlitePool,
    candidate: &EmployeeCandidate<'_>,
    exclude_id: Option<i64>,
) -> Result<(), ApiError> {
    let mut errors = ValidationErrors::new();

    for (field, value) in [
        ("employee_id", candidate.employee_id),
        ("full_name", candidate.full_name),
        ("email", candidate.email),
        ("department", candidate.department),
    ] {
        if value.trim().is_empty() {
            errors.add(field, "This field may not be blank.");
        }
    }

    if !candidate.email.trim().is_empty() && !is_valid_email(candidate.email) {
        errors.add("email", "Enter a valid email address.");
    }

    let exclude = exclude_id.unwrap_or(-1);

    let id_taken = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM employees WHERE employee_id = ? AND id != ?",
    )
    .bind(candidate.employee_id)
    .bind(exclude)
    .fetch_one(pool)
    .await?
        > 0;
    if id_taken {
        errors.add(
            "employee_id",
            "Employee with this employee id already exists.",
        );
    }

    let email_taken =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE email = ? AND id != ?")
            .bind(candidate.email)
            .bind(exclude)
            .fetch_one(pool)
            .await?
            > 0;
    if email_taken {
        errors.add("email", "Employee with this email already exists.");
    }

    errors.into_result()
}

/// Rejects when the referenced employee is missing or another row already
/// covers the same (employee, date) pair.
pub async fn attendance(
    pool: &SqlitePool,
    employee: i64,
    date: NaiveDate,
    exclude_id: Option<i64>,
) -> Result<(), ApiError> {
    let mut errors = ValidationErrors::new();

    let employee_exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE id = ?")
            .bind(employee)
            .fetch_one(pool)
            .await?
            > 0;
    if !employee_exists {
        errors.add(
            "employee",
            format!("Invalid pk \"{employee}\" - object does not exist."),
        );
    }

    let duplicate = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM attendance WHERE employee_id = ? AND date = ? AND id != ?",
    )
    .bind(employee)
    .bind(date)
    .bind(exclude_id.unwrap_or(-1))
    .fetch_one(pool)
    .await?
        > 0;
    if duplicate {
        errors.add(
            "non_field_errors",
            "The fields employee, date must make a unique set.",
        );
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("john@example.com"));
        assert!(is_valid_email("jane.smith+hr@company.co.uk"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("john@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("john doe@example.com"));
        assert!(!is_valid_email("john@example"));
    }
}
