use crate::config::Settings;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::{AppInfo, AppState};
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState`, shared by `main` and the tests.
pub struct StateBuilder {
    security_config: SecurityConfig,
    info: AppInfo,
    settings: Option<Settings>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            info: AppInfo::default(),
            settings: None,
        }
    }

    /// Connect to `settings.database_url` on build, and take JWT and `/info`
    /// values from `settings` too.
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.security_config = SecurityConfig::from_settings(settings);
        self.info = AppInfo::from_settings(settings);
        self.settings = Some(settings.clone());
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_info(mut self, info: AppInfo) -> Self {
        self.info = info;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        match self.settings {
            // single entrypoint: connect + migrate
            Some(settings) => {
                let conn = bootstrap_db(&settings).await?;
                Ok(AppState::new(conn, self.security_config, self.info))
            }
            None => Ok(AppState::new_without_db(self.security_config, self.info)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
