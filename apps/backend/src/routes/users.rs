use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::validated_json::ValidatedJson;
use crate::repos::users::User;
use crate::services::users::{self, NewUser, ProfileUpdate};
use crate::state::app_state::AppState;

/// Public view of a user. Never includes the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

async fn create_user(
    http_req: HttpRequest,
    body: ValidatedJson<NewUser>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    let user = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { users::register(txn, input).await })
    })
    .await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

async fn read_user(
    http_req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let user = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { users::get_profile(txn, &user_id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

async fn update_user(
    http_req: HttpRequest,
    current_user: CurrentUser,
    body: ValidatedJson<ProfileUpdate>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let input = body.into_inner();
    let user = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { users::update_profile(txn, &user_id, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

async fn delete_user(
    http_req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { users::delete_account(txn, &user_id).await })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(["", "/"])
            .route(web::post().to(create_user))
            .route(web::get().to(read_user))
            .route(web::put().to(update_user))
            .route(web::delete().to(delete_user)),
    );
}
