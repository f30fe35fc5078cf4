use actix_web::{web, App, HttpServer};
use backend::config::{load_dotenv, Settings};
use backend::infra::state::build_state;
use backend::middleware::{
    cors_middleware, AllowedHosts, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
use backend::routes;
use backend::telemetry;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A .env in the working directory is optional; real env vars win.
    let dotenv_path = load_dotenv();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    telemetry::init_tracing(settings.debug);
    if let Some(path) = &dotenv_path {
        info!(path = %path.display(), "loaded .env");
    }
    info!(settings = ?settings, "configuration loaded");

    let app_state = match build_state().with_settings(&settings).build().await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    info!(host = %settings.host, port = settings.port, "starting Todo API");

    let data = web::Data::new(app_state);
    let api_prefix = settings.api_prefix.clone();
    let allowed_hosts = settings.allowed_hosts.clone();
    let cors = settings.cors.clone();

    // Last `wrap` runs first: RequestTrace sees every request before anything else.
    HttpServer::new(move || {
        let api_prefix = api_prefix.clone();
        App::new()
            .wrap(SecurityHeaders)
            .wrap(AllowedHosts::new(&allowed_hosts))
            .wrap(cors_middleware(&cors))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(move |cfg| routes::configure(cfg, &api_prefix))
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
