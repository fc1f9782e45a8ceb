use actix_web::web;

use crate::{
    api::{attendance, employee},
    error,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Extractor failures (bad JSON body, malformed query dates, non-numeric
    // path ids) respond with the same JSON error shape as the handlers.
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler));

    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::replace_employee))
                            .route(web::patch().to(employee::patch_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    )
                    // /employees/{id}/attendances
                    .service(
                        web::resource("/{id}/attendances")
                            .route(web::get().to(employee::list_employee_attendances)),
                    ),
            )
            .service(
                web::scope("/attendances")
                    // /attendances
                    .service(
                        web::resource("")
                            .route(web::get().to(attendance::list_attendances))
                            .route(web::post().to(attendance::create_attendance)),
                    )
                    // /attendances/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(attendance::get_attendance))
                            .route(web::put().to(attendance::replace_attendance))
                            .route(web::patch().to(attendance::patch_attendance))
                            .route(web::delete().to(attendance::delete_attendance)),
                    ),
            ),
    );
}
