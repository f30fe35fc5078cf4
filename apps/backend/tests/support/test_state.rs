use backend::infra::state::build_state;
use backend::state::app_state::AppState;
use backend::Settings;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

/// Settings for a fresh in-memory database. Every `build_test_state` call gets
/// its own database, so tests never see each other's rows.
pub fn test_settings() -> Settings {
    test_settings_with(&[])
}

/// `test_settings` with some keys overridden.
pub fn test_settings_with(overrides: &[(&str, &str)]) -> Settings {
    let overrides: Vec<(String, String)> = overrides
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    Settings::from_lookup(|key| {
        if let Some((_, v)) = overrides.iter().find(|(k, _)| k == key) {
            return Some(v.clone());
        }
        match key {
            "DATABASE_URL" => Some("sqlite::memory:".to_string()),
            "SECRET_KEY" => Some(TEST_SECRET.to_string()),
            _ => None,
        }
    })
    .expect("test settings should be valid")
}

/// Connect, migrate and wrap the database described by `settings`.
pub async fn build_test_state(settings: &Settings) -> AppState {
    build_state()
        .with_settings(settings)
        .build()
        .await
        .expect("test state should build")
}
