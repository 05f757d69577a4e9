use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use client_core::ControllerOptions;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "quiz.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server_url: String,
    pub total_rounds: u32,
    pub game_over_delay_ms: u64,
    pub request_timeout_secs: Option<u64>,
    pub surface_errors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            total_rounds: client_core::DEFAULT_TOTAL_ROUNDS,
            game_over_delay_ms: 2000,
            request_timeout_secs: Some(30),
            surface_errors: true,
        }
    }
}

impl Settings {
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            total_rounds: self.total_rounds,
            game_over_delay: Duration::from_millis(self.game_over_delay_ms),
            surface_errors: self.surface_errors,
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Builds settings from defaults, then the config file, then the environment.
///
/// An explicitly requested file must exist; the default `quiz.toml` is optional.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<Settings> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let mut settings = match fs::read_to_string(&path) {
        Ok(raw) => parse_settings(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => Settings::default(),
    };

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    settings.server_url = normalize_server_url(&settings.server_url);
    Ok(settings)
}

fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    Ok(toml::from_str::<Settings>(raw)?)
}

fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("QUIZ_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = lookup("APP__TOTAL_ROUNDS") {
        settings.total_rounds = v
            .trim()
            .parse()
            .with_context(|| format!("invalid APP__TOTAL_ROUNDS '{v}'"))?;
    }

    if let Some(v) = lookup("APP__GAME_OVER_DELAY_MS") {
        settings.game_over_delay_ms = v
            .trim()
            .parse()
            .with_context(|| format!("invalid APP__GAME_OVER_DELAY_MS '{v}'"))?;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        let secs: u64 = v
            .trim()
            .parse()
            .with_context(|| format!("invalid APP__REQUEST_TIMEOUT_SECS '{v}'"))?;
        settings.request_timeout_secs = Some(secs);
    }

    if let Some(v) = lookup("APP__SURFACE_ERRORS") {
        settings.surface_errors = parse_flag(&v)
            .with_context(|| format!("invalid APP__SURFACE_ERRORS '{v}'"))?;
    }

    Ok(())
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{other}'"),
    }
}

pub fn normalize_server_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return Settings::default().server_url;
    }

    let trimmed = raw.trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
