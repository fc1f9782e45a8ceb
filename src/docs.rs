use crate::api::attendance::{CreateAttendance, UpdateAttendance};
use crate::api::employee::{CreateEmployee, UpdateEmployee};
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Attendance API",
        version = "1.0.0",
        description = r#"
## HR Record-Keeping Service

Stores employees and their daily attendance status.

- **Employee Management** — create, update, list, and view employee records
- **Attendance Management** — one Present/Absent record per employee per day,
  with filtering by employee and inclusive date range

JSON-based RESTful responses. Endpoints are intentionally unauthenticated.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::replace_employee,
        crate::api::employee::patch_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::list_employee_attendances,

        crate::api::attendance::list_attendances,
        crate::api::attendance::create_attendance,
        crate::api::attendance::get_attendance,
        crate::api::attendance::replace_attendance,
        crate::api::attendance::patch_attendance,
        crate::api::attendance::delete_attendance,
    ),
    components(
        schemas(
            Employee,
            Attendance,
            AttendanceStatus,
            CreateEmployee,
            UpdateEmployee,
            CreateAttendance,
            UpdateAttendance,
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;
