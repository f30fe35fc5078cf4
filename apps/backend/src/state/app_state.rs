use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::config::{Settings, APP_NAME};

/// Public, non-secret facts about the running service (served by `/info`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub app_name: String,
    pub version: String,
    pub debug: bool,
    pub api_prefix: String,
}

impl AppInfo {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            debug: settings.debug,
            api_prefix: settings.api_prefix.clone(),
            ..Self::default()
        }
    }
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            debug: false,
            api_prefix: "/api".to_string(),
        }
    }
}

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent in tests that never touch storage)
    pub db: Option<DatabaseConnection>,
    /// JWT settings
    pub security: SecurityConfig,
    pub info: AppInfo,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig, info: AppInfo) -> Self {
        Self {
            db: Some(db),
            security,
            info,
        }
    }

    pub fn new_without_db(security: SecurityConfig, info: AppInfo) -> Self {
        Self {
            db: None,
            security,
            info,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
