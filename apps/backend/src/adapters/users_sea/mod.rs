//! SeaORM adapter for the users table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::{todos, users};

pub mod dto;

pub use dto::{UserCreate, UserUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(id.to_string()).one(conn).await
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(conn)
        .await
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let user_active = users::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        username: Set(dto.username),
        email: Set(dto.email),
        hashed_password: Set(dto.hashed_password),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    user_active.insert(conn).await
}

/// Apply `dto` to user `id`. Returns `RecordNotFound` if the row is gone.
pub async fn update_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    dto: UserUpdate,
) -> Result<users::Model, sea_orm::DbErr> {
    if dto.is_empty() {
        return find_by_id(conn, id)
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("users.id {id}")));
    }

    let user_active = users::ActiveModel {
        id: Set(id.to_string()),
        username: dto.username.map_or(NotSet, Set),
        email: NotSet,
        hashed_password: dto.hashed_password.map_or(NotSet, Set),
        created_at: NotSet,
    };

    user_active.update(conn).await
}

/// Delete user `id` and everything they own. Returns the number of user rows removed.
pub async fn delete_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<u64, sea_orm::DbErr> {
    // The FK cascades too; deleting explicitly keeps SQLite connections
    // opened without foreign_keys=ON consistent.
    todos::Entity::delete_many()
        .filter(todos::Column::UserId.eq(id))
        .exec(conn)
        .await?;

    let result = users::Entity::delete_by_id(id.to_string()).exec(conn).await?;
    Ok(result.rows_affected)
}
