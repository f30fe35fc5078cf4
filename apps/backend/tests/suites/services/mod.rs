pub mod todos;
pub mod users;

use backend::infra::db::bootstrap_db;
use sea_orm::DatabaseConnection;

use crate::support::test_settings;

pub async fn fresh_db() -> DatabaseConnection {
    bootstrap_db(&test_settings())
        .await
        .expect("in-memory database should bootstrap")
}
