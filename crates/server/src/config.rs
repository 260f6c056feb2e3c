use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::warn;

const SETTINGS_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub data_path: String,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8050".into(),
            data_path: "spacex_launch_dash.csv".into(),
            max_body_bytes: 64 * 1024,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

pub(crate) fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let file_cfg = match raw.parse::<toml::Table>() {
        Ok(table) => table,
        Err(error) => {
            warn!(%error, file = SETTINGS_FILE, "ignoring unparseable settings file");
            return;
        }
    };

    if let Some(v) = file_cfg.get("bind_addr").and_then(toml::Value::as_str) {
        settings.server_bind = v.to_string();
    }
    if let Some(v) = file_cfg.get("data_path").and_then(toml::Value::as_str) {
        settings.data_path = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("max_body_bytes")
        .and_then(toml::Value::as_integer)
        .and_then(|v| usize::try_from(v).ok())
    {
        settings.max_body_bytes = v;
    }
}

/// Later keys win: the `APP__` spelling overrides the short one.
pub(crate) fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = lookup("DASHBOARD_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = lookup("DASHBOARD_DATA") {
        settings.data_path = v;
    }
    if let Some(v) = lookup("APP__DATA_PATH") {
        settings.data_path = v;
    }

    if let Some(v) = lookup("APP__MAX_BODY_BYTES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_body_bytes = parsed;
        }
    }
}

/// Resolves the dataset path and fails early when it is not a readable file,
/// so the server never starts without its launch table.
pub fn prepare_data_path(raw_data_path: &str) -> anyhow::Result<PathBuf> {
    let data_path = normalize_data_path(raw_data_path);

    let metadata = fs::metadata(&data_path)
        .with_context(|| format!("launch dataset '{}' is not readable", data_path.display()))?;
    if !metadata.is_file() {
        bail!("launch dataset '{}' is not a file", data_path.display());
    }

    Ok(data_path)
}

fn normalize_data_path(raw_data_path: &str) -> PathBuf {
    let raw_data_path = raw_data_path.trim();

    if raw_data_path.is_empty() {
        return PathBuf::from(Settings::default().data_path);
    }

    let raw_data_path = raw_data_path
        .strip_prefix("file://")
        .unwrap_or(raw_data_path);

    Path::new(raw_data_path).to_path_buf()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
