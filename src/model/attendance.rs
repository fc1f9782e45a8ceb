use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Daily attendance status. Stored as TEXT, variant names verbatim.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    sqlx::Type,
    Display,
    EnumString,
    ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Attendance {
    #[schema(example = 1)]
    pub id: i64,

    /// Primary key of the owning employee row.
    #[sqlx(rename = "employee_id")]
    #[schema(example = 1)]
    pub employee: i64,

    #[schema(example = "2023-10-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub status: AttendanceStatus,
}
