use std::time::Duration;

use sea_orm::ConnectOptions;

use crate::error::AppError;

/// Database flavour, derived from the `DATABASE_URL` scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl DbKind {
    pub fn from_url(url: &str) -> Result<Self, AppError> {
        let lower = url.trim().to_ascii_lowercase();
        if lower.starts_with("postgres://") || lower.starts_with("postgresql://") {
            Ok(DbKind::Postgres)
        } else if lower.starts_with("sqlite:") {
            if lower.contains(":memory:") || lower.contains("mode=memory") {
                Ok(DbKind::SqliteMemory)
            } else {
                Ok(DbKind::SqliteFile)
            }
        } else {
            Err(AppError::config(format!(
                "Unsupported scheme in 'DATABASE_URL': {}",
                sanitize_db_url(url)
            )))
        }
    }

    pub fn engine(self) -> &'static str {
        match self {
            DbKind::Postgres => "postgresql",
            DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
        }
    }

    /// Postgres: 20 steady + 10 overflow. In-memory SQLite must stay on a
    /// single connection or each connection sees its own empty database.
    pub fn max_connections(self) -> u32 {
        match self {
            DbKind::Postgres => 30,
            DbKind::SqliteFile => 4,
            DbKind::SqliteMemory => 1,
        }
    }
}

/// Pool options for `url`.
///
/// File-backed SQLite URLs go through [`migration::with_sqlite_create_mode`],
/// the same rewrite the migration CLI applies.
pub fn connect_options(url: &str, kind: DbKind, debug: bool) -> ConnectOptions {
    let mut opts = ConnectOptions::new(migration::with_sqlite_create_mode(url));
    opts.max_connections(kind.max_connections())
        .min_connections(if kind == DbKind::SqliteMemory { 1 } else { 0 })
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(debug);
    if kind == DbKind::SqliteMemory {
        // Closing the last connection drops the whole database.
        opts.idle_timeout(Duration::from_secs(u32::MAX as u64))
            .max_lifetime(Duration::from_secs(u32::MAX as u64));
    }
    opts
}

/// Strip credentials from a database URL so it can be logged.
pub fn sanitize_db_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}
