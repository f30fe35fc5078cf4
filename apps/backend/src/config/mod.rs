pub mod db;
pub mod settings;

pub use db::DbKind;
pub use settings::{load_dotenv, load_dotenv_from, CorsSettings, Settings, APP_NAME};
