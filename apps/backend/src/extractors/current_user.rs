use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde::Serialize;

use super::auth_token::AuthToken;
use crate::auth::jwt::verify_access_token;
use crate::db::require_db;
use crate::db::txn::SharedTxn;
use crate::error::AppError;
use crate::logging::security;
use crate::repos::users;
use crate::state::app_state::AppState;

/// The authenticated caller, loaded from the database by the token's `sub`.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        let token = AuthToken::from_request(&req, payload).into_inner();

        Box::pin(async move {
            let token = token?;
            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let claims = verify_access_token(&token.token, &app_state.security)?;

            let user = if let Some(shared_txn) = SharedTxn::from_req(&req) {
                users::find_by_id(shared_txn.transaction(), &claims.sub).await?
            } else {
                let db = require_db(app_state)?;
                users::find_by_id(db, &claims.sub).await?
            };

            let user = user.ok_or_else(|| {
                security::token_rejected("unknown_subject");
                AppError::unauthorized()
            })?;

            Ok(CurrentUser {
                id: user.id,
                username: user.username,
                email: user.email,
            })
        })
    }
}
