use actix_web::error::UrlencodedError;
use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod auth;
pub mod health;
pub mod todos;
pub mod users;

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::invalid(ErrorCode::ValidationError, err.to_string()).into()
    })
}

fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        match err {
            UrlencodedError::Parse(e) => {
                AppError::invalid(ErrorCode::ValidationError, e.to_string())
            }
            other => AppError::bad_request(ErrorCode::BadRequest, other.to_string()),
        }
        .into()
    })
}

/// Register every route. `/`, `/info` and `/health` sit at the root;
/// user, login and task routes live under `api_prefix` (may be empty).
pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    // Root routes first: an empty prefix scope would otherwise claim them.
    cfg.configure(health::configure_routes);

    cfg.service(
        web::scope(api_prefix)
            .app_data(query_config())
            .app_data(form_config())
            .service(web::scope("/user").configure(users::configure_routes))
            .configure(auth::configure_routes)
            .service(web::scope("/tasks").configure(todos::configure_routes)),
    );
}
