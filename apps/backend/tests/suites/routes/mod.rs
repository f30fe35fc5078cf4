pub mod auth_login;
pub mod healthcheck;
pub mod security_headers;
pub mod todos;
