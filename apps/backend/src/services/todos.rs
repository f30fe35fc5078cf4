use sea_orm::ConnectionTrait;
use serde::Deserialize;

use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::todos::{self, Todo, TodoCreate, TodoUpdate};
use crate::services::validation;

pub const DEFAULT_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 1000;
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Creation input. `state` defaults to `pendiente`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Partial update input. An explicit `"description": null` clears the description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoChanges {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub state: Option<String>,
}

fn todo_not_found() -> AppError {
    DomainError::not_found(NotFoundKind::Todo, "Todo not found").into()
}

/// `skip` defaults to 0; `limit` defaults to 100 and is capped at 1000.
/// Both end up as signed 64-bit SQL parameters, so `skip` saturates at
/// `i64::MAX` (an empty page) instead of overflowing the bind.
pub fn page_bounds(skip: Option<u64>, limit: Option<u64>) -> (u64, u64) {
    (
        skip.unwrap_or(0).min(MAX_OFFSET),
        limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
    )
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    skip: Option<u64>,
    limit: Option<u64>,
) -> Result<Vec<Todo>, AppError> {
    let (skip, limit) = page_bounds(skip, limit);
    Ok(todos::list_for_user(conn, user_id, skip, limit).await?)
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    input: NewTodo,
) -> Result<Todo, AppError> {
    let title = validation::title(&input.title)?;
    if let Some(d) = input.description.as_deref() {
        validation::description(d)?;
    }
    let state = match input.state.as_deref() {
        Some(raw) => validation::state(raw)?,
        None => Default::default(),
    };

    let dto = TodoCreate::new(user_id, title)
        .with_description(input.description)
        .with_state(state);
    Ok(todos::create_todo(conn, dto).await?)
}

/// The todo, if it exists and belongs to `user_id`. Someone else's todo is
/// reported exactly like a missing one.
pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    id: &str,
) -> Result<Todo, AppError> {
    match todos::find_by_id(conn, id).await? {
        Some(todo) if todo.user_id == user_id => Ok(todo),
        _ => Err(todo_not_found()),
    }
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    id: &str,
    input: TodoChanges,
) -> Result<Todo, AppError> {
    get(conn, user_id, id).await?;

    let mut dto = TodoUpdate::default();
    if let Some(raw) = input.title.as_deref() {
        dto.title = Some(validation::title(raw)?);
    }
    if let Some(description) = input.description {
        if let Some(d) = description.as_deref() {
            validation::description(d)?;
        }
        dto.description = Some(description);
    }
    if let Some(raw) = input.state.as_deref() {
        dto.state = Some(validation::state(raw)?);
    }

    todos::update_todo(conn, id, dto)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::NotFound { .. } => todo_not_found(),
            other => other,
        })
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    id: &str,
) -> Result<(), AppError> {
    get(conn, user_id, id).await?;
    if !todos::delete_todo(conn, id).await? {
        return Err(todo_not_found());
    }
    Ok(())
}
