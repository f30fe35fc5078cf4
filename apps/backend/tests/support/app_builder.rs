use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use backend::middleware::{
    cors_middleware, AllowedHosts, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
use backend::routes;
use backend::state::app_state::AppState;
use backend::Settings;

/// Build a test service wired exactly like `main.rs`: same middleware order,
/// same routes under `settings.api_prefix`.
pub async fn create_test_app(
    state: AppState,
    settings: &Settings,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let data = web::Data::new(state);
    let api_prefix = settings.api_prefix.clone();

    test::init_service(
        App::new()
            .wrap(SecurityHeaders)
            .wrap(AllowedHosts::new(&settings.allowed_hosts))
            .wrap(cors_middleware(&settings.cors))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data)
            .configure(move |cfg| routes::configure(cfg, &api_prefix)),
    )
    .await
}
