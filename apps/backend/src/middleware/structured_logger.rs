use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::Error as ActixError;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::Level;

use super::request_trace::TraceId;

/// Severity for a finished request: 5xx is an error, 4xx a warning.
fn level_for(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

#[derive(Clone, Copy)]
struct Completed<'a> {
    method: &'a str,
    route: &'a str,
    trace_id: &'a str,
    status: StatusCode,
    duration_us: u64,
}

impl Completed<'_> {
    fn emit(&self) {
        let Completed {
            method,
            route,
            trace_id,
            status,
            duration_us,
        } = *self;
        let status_code = status.as_u16();

        macro_rules! completed {
            ($lvl:expr) => {
                tracing::event!(
                    $lvl,
                    http.method = %method,
                    http.route = %route,
                    http.status_code = status_code,
                    duration_us,
                    trace_id = %trace_id,
                    "request_completed"
                )
            };
        }

        let level = level_for(status);
        if level == Level::ERROR {
            completed!(Level::ERROR);
        } else if level == Level::WARN {
            completed!(Level::WARN);
        } else {
            completed!(Level::INFO);
        }
    }
}

/// Emits one `request_completed` event per request.
///
/// The route is logged as its matched pattern (`/api/tasks/{todo_id}`), so
/// todo ids and query strings never reach the logs.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let trace_id = TraceId::of(&req, "unknown");
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, route) = match &result {
                Ok(res) => (
                    res.status(),
                    res.request()
                        .match_pattern()
                        .unwrap_or_else(|| "<unmatched>".to_string()),
                ),
                Err(err) => (
                    err.as_response_error().status_code(),
                    "<unmatched>".to_string(),
                ),
            };

            Completed {
                method: &method,
                route: &route,
                trace_id: &trace_id,
                status,
                duration_us: u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
            }
            .emit();

            result
        })
    }
}
