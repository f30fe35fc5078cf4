pub mod app_state;
pub mod security_config;

pub use app_state::{AppInfo, AppState};
pub use security_config::SecurityConfig;
