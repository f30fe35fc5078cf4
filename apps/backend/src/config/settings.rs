//! Typed application settings.
//!
//! Values come from the process environment (after an optional `.env`
//! load). Keys are matched case-insensitively and unknown keys are ignored.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::Algorithm;
use rand::Rng;

use crate::config::db::DbKind;
use crate::error::AppError;

pub const APP_NAME: &str = "Todo API";

const DEFAULT_TOKEN_MINUTES: i64 = 30;
const DEFAULT_API_PREFIX: &str = "/api";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsSettings {
    pub origins: Vec<String>,
    pub allow_credentials: bool,
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            origins: Vec::new(),
            allow_credentials: false,
            allow_methods: vec!["*".to_string()],
            allow_headers: vec!["*".to_string()],
        }
    }
}

#[derive(Clone)]
pub struct Settings {
    pub database_url: String,
    pub secret_key: String,
    pub algorithm: Algorithm,
    pub access_token_expire_minutes: i64,
    pub debug: bool,
    pub allowed_hosts: Vec<String>,
    pub api_prefix: String,
    pub cors: CorsSettings,
    pub host: String,
    pub port: u16,
}

// Hand-written so the signing secret never ends up in a log line.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("database_kind", &DbKind::from_url(&self.database_url).ok())
            .field("algorithm", &self.algorithm)
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .field("debug", &self.debug)
            .field("allowed_hosts", &self.allowed_hosts)
            .field("api_prefix", &self.api_prefix)
            .field("cors", &self.cors)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        let vars: HashMap<String, String> = std::env::vars()
            .map(|(k, v)| (k.to_ascii_uppercase(), v))
            .collect();
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Load settings through `lookup`, which is asked for upper-case key names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string());

        let database_url = get("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::config("Required environment variable 'DATABASE_URL' is not set")
            })?;
        DbKind::from_url(&database_url)?;

        let secret_key = match get("SECRET_KEY").filter(|v| !v.is_empty()) {
            Some(v) => v,
            None => generate_secret_key(),
        };

        let algorithm = match get("ALGORITHM") {
            Some(v) => parse_algorithm(&v)?,
            None => Algorithm::HS256,
        };

        let access_token_expire_minutes = match get("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(v) => match v.parse::<i64>() {
                Ok(n) if n > 0 => n,
                _ => return Err(invalid("ACCESS_TOKEN_EXPIRE_MINUTES", &v)),
            },
            None => DEFAULT_TOKEN_MINUTES,
        };

        let debug = parse_bool_key("DEBUG", get("DEBUG"), false)?;

        let allowed_hosts = match get("ALLOWED_HOSTS") {
            Some(v) => parse_list("ALLOWED_HOSTS", &v)?,
            None => vec!["*".to_string()],
        };

        let api_prefix = normalize_prefix(
            get("API_PREFIX")
                .as_deref()
                .unwrap_or(DEFAULT_API_PREFIX),
        );

        let defaults = CorsSettings::default();
        let cors = CorsSettings {
            origins: match get("CORS_ORIGINS") {
                Some(v) => parse_list("CORS_ORIGINS", &v)?,
                None => defaults.origins,
            },
            allow_credentials: parse_bool_key(
                "CORS_ALLOW_CREDENTIALS",
                get("CORS_ALLOW_CREDENTIALS"),
                defaults.allow_credentials,
            )?,
            allow_methods: match get("CORS_ALLOW_METHODS") {
                Some(v) => parse_list("CORS_ALLOW_METHODS", &v)?,
                None => defaults.allow_methods,
            },
            allow_headers: match get("CORS_ALLOW_HEADERS") {
                Some(v) => parse_list("CORS_ALLOW_HEADERS", &v)?,
                None => defaults.allow_headers,
            },
        };

        let host = get("HOST")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match get("PORT") {
            Some(v) => v.parse::<u16>().map_err(|_| invalid("PORT", &v))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            secret_key,
            algorithm,
            access_token_expire_minutes,
            debug,
            allowed_hosts,
            api_prefix,
            cors,
            host,
            port,
        })
    }

    pub fn db_kind(&self) -> Result<DbKind, AppError> {
        DbKind::from_url(&self.database_url)
    }
}

/// Load `.env` from the working directory (or a parent) if one exists and
/// return its path. Variables already present in the environment win.
///
/// Runs before tracing is installed, so logging the path is up to the caller.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Load a specific env file. Missing files are an error here, unlike [`load_dotenv`].
pub fn load_dotenv_from(path: &Path) -> Result<(), AppError> {
    dotenvy::from_path(path)
        .map_err(|e| AppError::config(format!("Failed to load '{}': {e}", path.display())))
}

fn invalid(key: &str, value: &str) -> AppError {
    AppError::config(format!("Invalid value for '{key}': '{value}'"))
}

fn generate_secret_key() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn parse_algorithm(value: &str) -> Result<Algorithm, AppError> {
    match value.to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        _ => Err(invalid("ALGORITHM", value)),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_bool_key(key: &str, value: Option<String>, default: bool) -> Result<bool, AppError> {
    match value {
        Some(v) => parse_bool(&v).ok_or_else(|| invalid(key, &v)),
        None => Ok(default),
    }
}

/// JSON array or comma-separated list; entries trimmed, empties dropped.
fn parse_list(key: &str, value: &str) -> Result<Vec<String>, AppError> {
    let items: Vec<String> = if value.starts_with('[') {
        serde_json::from_str::<Vec<String>>(value).map_err(|_| invalid(key, value))?
    } else {
        value.split(',').map(str::to_string).collect()
    };

    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

/// `"api/"` -> `"/api"`; `""` and `"/"` -> `""`.
fn normalize_prefix(value: &str) -> String {
    let trimmed = value.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
