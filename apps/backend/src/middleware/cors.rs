use actix_cors::Cors;
use actix_web::http::header::HeaderName;
use actix_web::http::Method;
use tracing::warn;

use crate::config::CorsSettings;

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

/// Build CORS middleware from settings.
///
/// `*` in origins, methods or headers means "any". Entries that are not
/// valid method or header names are skipped with a warning. An empty origin
/// list allows no cross-origin requests.
pub fn cors_middleware(settings: &CorsSettings) -> Cors {
    let mut cors = Cors::default()
        .expose_headers(vec![
            HeaderName::from_static("x-trace-id"),
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600);

    if is_wildcard(&settings.origins) {
        cors = cors.allow_any_origin();
    } else {
        for origin in settings
            .origins
            .iter()
            .filter(|o| o.starts_with("http://") || o.starts_with("https://"))
        {
            cors = cors.allowed_origin(origin);
        }
    }

    if is_wildcard(&settings.allow_methods) {
        cors = cors.allow_any_method();
    } else {
        let methods: Vec<Method> = settings
            .allow_methods
            .iter()
            .filter_map(|m| match Method::from_bytes(m.to_ascii_uppercase().as_bytes()) {
                Ok(method) => Some(method),
                Err(_) => {
                    warn!(method = %m, "ignoring invalid CORS method");
                    None
                }
            })
            .collect();
        cors = cors.allowed_methods(methods);
    }

    if is_wildcard(&settings.allow_headers) {
        cors = cors.allow_any_header();
    } else {
        let headers: Vec<HeaderName> = settings
            .allow_headers
            .iter()
            .filter_map(|h| match HeaderName::from_bytes(h.as_bytes()) {
                Ok(name) => Some(name),
                Err(_) => {
                    warn!(header = %h, "ignoring invalid CORS header");
                    None
                }
            })
            .collect();
        cors = cors.allowed_headers(headers);
    }

    if settings.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
