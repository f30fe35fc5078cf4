//! Repositories: domain models over the SeaORM adapters, generic over `ConnectionTrait`.

pub mod todos;
pub mod users;
