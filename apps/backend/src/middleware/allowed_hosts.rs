//! Host header allow-list.
//!
//! Patterns are matched against the Host header with any port removed,
//! case-insensitively. `*` allows everything; `*.example.com` allows any
//! subdomain of example.com (but not example.com itself).

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error as ActixError, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::security;

#[derive(Debug, Clone)]
pub struct AllowedHosts {
    patterns: Rc<Vec<String>>,
}

impl AllowedHosts {
    pub fn new(patterns: &[String]) -> Self {
        Self {
            patterns: Rc::new(patterns.iter().map(|p| p.to_ascii_lowercase()).collect()),
        }
    }

    pub fn allows(&self, host: Option<&str>) -> bool {
        host_allowed(&self.patterns, host)
    }
}

fn strip_port(host: &str) -> &str {
    // [::1]:8000 keeps its brackets
    if let Some(end) = host.find(']') {
        return &host[..=end];
    }
    host.split(':').next().unwrap_or(host)
}

fn host_allowed(patterns: &[String], host: Option<&str>) -> bool {
    if patterns.iter().any(|p| p == "*") {
        return true;
    }
    let Some(host) = host else {
        return false;
    };
    let host = strip_port(host.trim()).to_ascii_lowercase();

    patterns.iter().any(|pattern| match pattern.strip_prefix("*.") {
        Some(suffix) => host.ends_with(&format!(".{suffix}")),
        None => *pattern == host,
    })
}

impl<S, B> Transform<S, ServiceRequest> for AllowedHosts
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type InitError = ();
    type Transform = AllowedHostsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AllowedHostsMiddleware {
            service,
            hosts: self.clone(),
        }))
    }
}

pub struct AllowedHostsMiddleware<S> {
    service: S,
    hosts: AllowedHosts,
}

impl<S, B> Service<ServiceRequest> for AllowedHostsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let host = req
            .headers()
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| req.uri().authority().map(|a| a.to_string()));

        if self.hosts.allows(host.as_deref()) {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        Box::pin(async move {
            security::host_rejected(host.as_deref().unwrap_or(""));
            // Rendered here so the trace context of the request is in scope.
            let err = AppError::bad_request(ErrorCode::InvalidHost, "Invalid host header");
            let response = err.error_response();
            Ok(req.into_response(response).map_into_right_body())
        })
    }
}
