use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;

use crate::view_state::SettlePolicy;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const SETTINGS_FILE: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_url: String,
    pub request_timeout: Option<Duration>,
    pub settle_policy: SettlePolicy,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            request_timeout: None,
            settle_policy: SettlePolicy::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
    settle_policy: Option<SettlePolicy>,
}

/// Defaults, then `client.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Err(err) = apply_file_settings(&mut settings, &raw) {
            tracing::warn!(path = %path.display(), "ignoring settings file: {err:#}");
        }
    }

    apply_env_overrides(&mut settings, env);
    settings
}

fn apply_file_settings(settings: &mut ClientSettings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw).context("invalid client settings toml")?;

    if let Some(v) = file_cfg.api_url {
        settings.api_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout = timeout_from_secs(v);
    }
    if let Some(v) = file_cfg.settle_policy {
        settings.settle_policy = v;
    }
    Ok(())
}

fn apply_env_overrides(settings: &mut ClientSettings, env: impl Fn(&str) -> Option<String>) {
    // Later names win.
    for key in ["VITE_API_URL", "QRNG_API_URL", "APP__API_URL"] {
        if let Some(v) = env(key) {
            settings.api_url = v;
        }
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout = timeout_from_secs(parsed);
        }
    }

    if let Some(v) = env("APP__SETTLE_POLICY") {
        match v.parse::<SettlePolicy>() {
            Ok(policy) => settings.settle_policy = policy,
            Err(err) => tracing::warn!("ignoring APP__SETTLE_POLICY: {err}"),
        }
    }
}

/// Zero disables the timeout.
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
