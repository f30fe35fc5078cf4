use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::entities::todos::TodoState;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::validated_json::ValidatedJson;
use crate::repos::todos::Todo;
use crate::services::todos::{self, NewTodo, TodoChanges};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub state: TodoState,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub user_id: String,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            state: todo.state,
            created_at: todo.created_at,
            user_id: todo.user_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Pagination {
    skip: Option<u64>,
    limit: Option<u64>,
}

async fn list_todos(
    http_req: HttpRequest,
    current_user: CurrentUser,
    query: web::Query<Pagination>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let Pagination { skip, limit } = query.into_inner();

    let items = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { todos::list(txn, &user_id, skip, limit).await })
    })
    .await?;

    let body: Vec<TodoResponse> = items.into_iter().map(TodoResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn create_todo(
    http_req: HttpRequest,
    current_user: CurrentUser,
    body: ValidatedJson<NewTodo>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let input = body.into_inner();

    let todo = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { todos::create(txn, &user_id, input).await })
    })
    .await?;

    Ok(HttpResponse::Created().json(TodoResponse::from(todo)))
}

async fn read_todo(
    http_req: HttpRequest,
    current_user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let todo_id = path.into_inner();

    let todo = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { todos::get(txn, &user_id, &todo_id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(TodoResponse::from(todo)))
}

async fn update_todo(
    http_req: HttpRequest,
    current_user: CurrentUser,
    path: web::Path<String>,
    body: ValidatedJson<TodoChanges>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let todo_id = path.into_inner();
    let input = body.into_inner();

    let todo = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { todos::update(txn, &user_id, &todo_id, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(TodoResponse::from(todo)))
}

async fn delete_todo(
    http_req: HttpRequest,
    current_user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let todo_id = path.into_inner();

    with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { todos::delete(txn, &user_id, &todo_id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Todo deleted successfully" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(["", "/"])
            .route(web::get().to(list_todos))
            .route(web::post().to(create_todo)),
    )
    .service(
        web::resource("/{todo_id}")
            .route(web::get().to(read_todo))
            .route(web::put().to(update_todo))
            .route(web::delete().to(delete_todo)),
    );
}
