//! SeaORM adapter for the todos table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::todos;

pub mod dto;

pub use dto::{TodoCreate, TodoUpdate};

/// Page of `user_id`'s todos in creation order.
pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    skip: u64,
    limit: u64,
) -> Result<Vec<todos::Model>, sea_orm::DbErr> {
    todos::Entity::find()
        .filter(todos::Column::UserId.eq(user_id))
        .order_by_asc(todos::Column::CreatedAt)
        .order_by_asc(todos::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<todos::Model>, sea_orm::DbErr> {
    todos::Entity::find_by_id(id.to_string()).one(conn).await
}

pub async fn create_todo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TodoCreate,
) -> Result<todos::Model, sea_orm::DbErr> {
    let todo_active = todos::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        title: Set(dto.title),
        description: Set(dto.description),
        state: Set(dto.state),
        created_at: Set(time::OffsetDateTime::now_utc()),
        user_id: Set(dto.user_id),
    };

    todo_active.insert(conn).await
}

/// Apply `dto` to todo `id`. Returns `RecordNotFound` if the row is gone.
pub async fn update_todo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    dto: TodoUpdate,
) -> Result<todos::Model, sea_orm::DbErr> {
    if dto.is_empty() {
        return find_by_id(conn, id)
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("todos.id {id}")));
    }

    let todo_active = todos::ActiveModel {
        id: Set(id.to_string()),
        title: dto.title.map_or(NotSet, Set),
        description: dto.description.map_or(NotSet, Set),
        state: dto.state.map_or(NotSet, Set),
        created_at: NotSet,
        user_id: NotSet,
    };

    todo_active.update(conn).await
}

pub async fn delete_todo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<u64, sea_orm::DbErr> {
    let result = todos::Entity::delete_by_id(id.to_string()).exec(conn).await?;
    Ok(result.rows_affected)
}
