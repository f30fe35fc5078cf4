//! Todo repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::todos_sea as todos_adapter;
use crate::entities::todos::TodoState;
use crate::errors::domain::DomainError;

pub use todos_adapter::{TodoCreate, TodoUpdate};

/// Todo domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub state: TodoState,
    pub created_at: time::OffsetDateTime,
    pub user_id: String,
}

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    skip: u64,
    limit: u64,
) -> Result<Vec<Todo>, DomainError> {
    let rows = todos_adapter::list_for_user(conn, user_id, skip, limit).await?;
    Ok(rows.into_iter().map(Todo::from).collect())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<Todo>, DomainError> {
    let todo = todos_adapter::find_by_id(conn, id).await?;
    Ok(todo.map(Todo::from))
}

pub async fn create_todo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TodoCreate,
) -> Result<Todo, DomainError> {
    let todo = todos_adapter::create_todo(conn, dto).await?;
    Ok(Todo::from(todo))
}

pub async fn update_todo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    dto: TodoUpdate,
) -> Result<Todo, DomainError> {
    let todo = todos_adapter::update_todo(conn, id, dto).await?;
    Ok(Todo::from(todo))
}

/// Returns `true` when a row was deleted.
pub async fn delete_todo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<bool, DomainError> {
    let rows = todos_adapter::delete_todo(conn, id).await?;
    Ok(rows > 0)
}

impl From<crate::entities::todos::Model> for Todo {
    fn from(model: crate::entities::todos::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            state: model.state,
            created_at: model.created_at,
            user_id: model.user_id,
        }
    }
}
