use actix_web::{web, HttpRequest, HttpResponse};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::services::auth::{self, LoginForm};
use crate::state::app_state::AppState;

/// OAuth2 password grant: form-encoded `username` + `password`.
async fn login(
    http_req: HttpRequest,
    form: web::Form<LoginForm>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let security = app_state.security.clone();

    let token = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { auth::login(txn, &security, &form).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(token))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(["/login", "/login/"]).route(web::post().to(login)));
}
