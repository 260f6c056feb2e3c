use super::{
    apply_env_overrides, apply_file_overrides, normalize_data_path, prepare_data_path, Settings,
};

use std::{collections::HashMap, fs, path::PathBuf};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn defaults_serve_dash_port_and_working_directory_csv() {
    let settings = Settings::default();
    assert_eq!(settings.server_bind, "127.0.0.1:8050");
    assert_eq!(settings.data_path, "spacex_launch_dash.csv");
}

#[test]
fn file_overrides_known_keys() {
    let mut settings = Settings::default();
    apply_file_overrides(
        &mut settings,
        r#"
bind_addr = "0.0.0.0:9000"
data_path = "data/launches.csv"
max_body_bytes = 1024
"#,
    );
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.data_path, "data/launches.csv");
    assert_eq!(settings.max_body_bytes, 1024);
}

#[test]
fn unparseable_file_keeps_defaults() {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, "bind_addr = ");
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_short_name() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env_from(&[
            ("DASHBOARD_BIND", "127.0.0.1:1"),
            ("APP__BIND_ADDR", "127.0.0.1:2"),
            ("DASHBOARD_DATA", "launches.csv"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:2");
    assert_eq!(settings.data_path, "launches.csv");
}

#[test]
fn invalid_body_limit_env_is_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, env_from(&[("APP__MAX_BODY_BYTES", "lots")]));
    assert_eq!(settings.max_body_bytes, Settings::default().max_body_bytes);
}

#[test]
fn normalizes_blank_and_file_url_paths() {
    assert_eq!(
        normalize_data_path("  "),
        PathBuf::from("spacex_launch_dash.csv")
    );
    assert_eq!(
        normalize_data_path("file:///srv/launches.csv"),
        PathBuf::from("/srv/launches.csv")
    );
}

#[test]
fn missing_dataset_is_fatal() {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let missing = temp_dir.path().join("absent.csv");
    let err = prepare_data_path(missing.to_string_lossy().as_ref()).expect_err("should fail");
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn directory_is_not_a_dataset() {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let err = prepare_data_path(temp_dir.path().to_string_lossy().as_ref())
        .expect_err("should fail");
    assert!(err.to_string().contains("not a file"));
}

#[test]
fn existing_dataset_path_is_returned() {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let path = temp_dir.path().join("launches.csv");
    fs::write(&path, "Launch Site\n").expect("write");
    assert_eq!(
        prepare_data_path(path.to_string_lossy().as_ref()).expect("path"),
        path
    );
}
