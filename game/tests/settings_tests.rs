use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crimson::error::StartupError;
use crimson::headful::app::startup;
use crimson::settings::{Settings, SettingsError, SettingsStore};
use engine::app::AppConfig;

fn temp_settings_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("crimson_settings_{tag}_{nanos}.json"))
}

#[test]
fn missing_file_yields_defaults() {
    let store = SettingsStore::at(temp_settings_path("missing"));
    assert_eq!(store.load().expect("defaults"), Settings::default());
}

#[test]
fn file_values_are_loaded_and_sanitized() {
    let path = temp_settings_path("valid");
    std::fs::write(
        &path,
        r#"{"video":{"window_scale":9},"input":{"ignore_pause_key_repeat":true}}"#,
    )
    .expect("write settings");

    let settings = SettingsStore::at(&path).load().expect("load settings");
    let _ = std::fs::remove_file(&path);

    assert_eq!(settings.video.window_scale, 4);
    assert!(settings.input.ignore_pause_key_repeat);
}

#[test]
fn malformed_file_is_a_parse_error() {
    let path = temp_settings_path("malformed");
    std::fs::write(&path, "{ not json").expect("write settings");

    let err = SettingsStore::at(&path).load().expect_err("must fail");
    let _ = std::fs::remove_file(&path);

    assert!(matches!(err, SettingsError::Parse { .. }));
    assert!(err.to_string().contains("crimson_settings_malformed"));
}

#[test]
fn startup_surfaces_settings_errors() {
    let path = temp_settings_path("startup");
    std::fs::write(&path, "42").expect("write settings");

    let result = startup(&SettingsStore::at(&path));
    let _ = std::fs::remove_file(&path);

    assert!(matches!(
        result,
        Err(StartupError::Settings(SettingsError::Parse { .. }))
    ));
}

#[test]
fn startup_with_defaults_builds_window_config() {
    let app = startup(&SettingsStore::at(temp_settings_path("absent"))).expect("startup");
    let config = app.app_config();
    assert_eq!(config.title, "Crimson");
    assert_eq!((config.canvas.width, config.canvas.height), (800, 600));
    assert_eq!(config.window_scale, 1);
}

#[test]
fn vsync_flag_in_file_is_ignored() {
    let path = temp_settings_path("vsync_off");
    std::fs::write(&path, r#"{"video":{"vsync":false,"window_scale":2}}"#)
        .expect("write settings");

    let app = startup(&SettingsStore::at(&path)).expect("startup");
    let _ = std::fs::remove_file(&path);

    // Exhaustive: the window config has no field that could switch vsync off.
    let AppConfig {
        title,
        canvas: _,
        window_scale,
    } = app.app_config();
    assert_eq!(title, "Crimson");
    assert_eq!(window_scale, 2);
}
