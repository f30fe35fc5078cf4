use std::future::Future;
use std::time::Duration;

use migration::{count_applied_migrations, migrate, MigrationCommand};
use sea_orm::{Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{connect_options, sanitize_db_url, DbKind};
use crate::config::Settings;
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 500;

/// Retry `connect_fn` at a fixed interval; returns the last error once attempts run out.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

/// Open the connection pool described by `settings`. Does NOT run migrations.
pub async fn connect_db(settings: &Settings) -> Result<DatabaseConnection, AppError> {
    let kind = settings.db_kind()?;
    let opts = connect_options(&settings.database_url, kind, settings.debug);

    let attempts = match kind {
        DbKind::Postgres => CONNECT_ATTEMPTS,
        DbKind::SqliteFile | DbKind::SqliteMemory => 1,
    };

    let conn = retry_connection(
        || {
            let opts = opts.clone();
            async move { Database::connect(opts).await.map_err(AppError::from) }
        },
        attempts,
        CONNECT_INTERVAL_MS,
    )
    .await?;

    info!(
        engine = kind.engine(),
        url = %sanitize_db_url(&settings.database_url),
        max_connections = kind.max_connections(),
        "database connected"
    );
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(settings: &Settings) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(settings).await?;

    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("Failed to apply migrations: {e}")))?;

    let applied = count_applied_migrations(&conn).await?;
    info!(applied, "schema ready");
    Ok(conn)
}
