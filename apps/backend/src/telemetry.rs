use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global JSON subscriber.
///
/// `RUST_LOG` wins when set; otherwise `debug` picks between a verbose
/// and a quiet default filter.
pub fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "debug,actix_web=debug,sqlx=info,sea_orm=info"
    } else {
        "info,actix_web=info,sqlx=warn,sea_orm=warn"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = fmt::layer()
        .with_target(debug)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json();

    // try_init: a second call (tests, embedded use) must not panic.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
