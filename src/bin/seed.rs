//! Populates two demo employees and five attendance rows, mirroring the
//! scenario the integration tests exercise.

use chrono::NaiveDate;
use dotenvy::dotenv;
use tracing::info;

use hrms::config::Config;
use hrms::db::init_db;
use hrms::model::attendance::AttendanceStatus;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt().init();

    let config = Config::from_env();
    let pool = init_db(&config.database_url).await;

    let mut ids = Vec::new();
    for (employee_id, full_name, email, department) in [
        ("EMP001", "John Doe", "john@example.com", "IT"),
        ("EMP002", "Jane Smith", "jane@example.com", "HR"),
    ] {
        let id = sqlx::query(
            "INSERT INTO employees (employee_id, full_name, email, department) VALUES (?, ?, ?, ?)",
        )
        .bind(employee_id)
        .bind(full_name)
        .bind(email)
        .bind(department)
        .execute(&pool)
        .await?
        .last_insert_rowid();
        ids.push(id);
    }

    let rows = [
        (ids[0], "2023-10-01", AttendanceStatus::Present),
        (ids[0], "2023-10-02", AttendanceStatus::Absent),
        (ids[0], "2023-10-03", AttendanceStatus::Present),
        (ids[1], "2023-10-01", AttendanceStatus::Present),
        (ids[1], "2023-10-02", AttendanceStatus::Present),
    ];
    for (employee, date, status) in rows {
        let date: NaiveDate = date.parse()?;
        sqlx::query("INSERT INTO attendance (employee_id, date, status) VALUES (?, ?, ?)")
            .bind(employee)
            .bind(date)
            .bind(status)
            .execute(&pool)
            .await?;
    }

    info!("Data populated successfully");
    Ok(())
}
