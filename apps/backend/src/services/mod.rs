pub mod auth;
pub mod todos;
pub mod users;
pub mod validation;
