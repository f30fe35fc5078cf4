use std::process::ExitCode;

use clap::Parser;
use migration::{migrate, with_sqlite_create_mode, MigrationCommand};
use sea_orm::{ConnectOptions, Database};

#[derive(Parser)]
#[command(name = "migration")]
#[command(about = "Todo API database migration tool")]
struct Args {
    /// Migration command to run: up | down | fresh | reset | refresh | status
    command: MigrationCommand,

    /// Database URL; falls back to DATABASE_URL from the environment or .env
    #[arg(long)]
    database_url: Option<String>,
}

/// `DATABASE_URL` from `vars`, matching the key case-insensitively like the
/// server's settings loader.
fn database_url_from<I>(vars: I) -> Option<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    vars.into_iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("DATABASE_URL"))
        .map(|(_, value)| value)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    let url = match args
        .database_url
        .or_else(|| database_url_from(std::env::vars()))
    {
        Some(url) if !url.trim().is_empty() => url,
        _ => {
            eprintln!("❌ DATABASE_URL must be set (environment, .env, or --database-url)");
            return ExitCode::from(2);
        }
    };

    if url.contains(":memory:") {
        eprintln!("❌ In-memory SQLite databases are not supported for CLI operations.");
        eprintln!("   Each CLI invocation would migrate a fresh, throwaway database.");
        return ExitCode::from(2);
    }

    let mut opt = ConnectOptions::new(with_sqlite_create_mode(&url));
    opt.max_connections(1).sqlx_logging(false);

    let db = match Database::connect(opt).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = migrate(&db, args.command).await {
        eprintln!("Migration failed: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
