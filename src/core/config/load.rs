//! Configuration loading with default substitution and env overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::AppError;

use super::raw::{self, RawConfig};
use super::types::*;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Load config from the given path, or `config.yaml`, then apply env overrides.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let log_level_override = env::var("QUICK_CAPTURE_LOG_LEVEL").ok();
    let path = Path::new(config_path.unwrap_or(DEFAULT_CONFIG_PATH));
    load_from(path, log_level_override.as_deref())
}

/// Internal loader — accepts an explicit path and an optional log-level override.
/// Tests pass the override directly instead of mutating env vars.
///
/// A missing file is not an error: every field falls back to its default
/// and [`Config::loaded_from`] is `None`.
/// A file that exists but cannot be read or parsed is.
pub fn load_from(path: &Path, log_level_override: Option<&str>) -> Result<Config, AppError> {
    if !path.exists() {
        return Ok(resolve(RawConfig::default(), log_level_override, None));
    }

    let text = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
    let parsed = parse(&text)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    Ok(resolve(parsed, log_level_override, Some(path.to_path_buf())))
}

/// An empty document (blank, comments only, or just `null`) is treated as
/// "no overrides".
fn parse(text: &str) -> Result<RawConfig, serde_yaml::Error> {
    let has_content = text
        .lines()
        .map(str::trim)
        .any(|line| !line.is_empty() && !line.starts_with('#'));
    if !has_content {
        return Ok(RawConfig::default());
    }
    let parsed: Option<RawConfig> = serde_yaml::from_str(text)?;
    Ok(parsed.unwrap_or_default())
}

fn resolve(
    parsed: RawConfig,
    log_level_override: Option<&str>,
    loaded_from: Option<PathBuf>,
) -> Config {
    let p = parsed.paths;
    let a = parsed.api;
    let pr = parsed.processing;

    let log_level = log_level_override
        .map(str::to_string)
        .or(parsed.logging.level)
        .unwrap_or_else(raw::default_log_level);

    Config {
        paths: PathsConfig {
            note_path: expand_home(&p.quick_capture.unwrap_or_else(raw::default_quick_capture)),
            transcribe_tool: expand_home(
                &p.transcribe_script.unwrap_or_else(raw::default_transcribe_script),
            ),
            output_dir: expand_home(&p.output_dir.unwrap_or_else(raw::default_output_dir)),
        },
        api: ApiConfig {
            ollama_endpoint: a.ollama_endpoint.unwrap_or_else(raw::default_ollama_endpoint),
            model: a.model.unwrap_or_else(raw::default_model),
            timeout_seconds: a.timeout_seconds,
        },
        processing: ProcessingConfig {
            courtesy_interval: Duration::from_secs(
                pr.courtesy_interval_secs
                    .unwrap_or_else(raw::default_courtesy_interval_secs),
            ),
            transcribe_device: pr
                .transcribe_device
                .unwrap_or_else(raw::default_transcribe_device),
            web_text_limit: pr.web_text_limit.unwrap_or_else(raw::default_web_text_limit),
        },
        log_level,
        loaded_from,
    }
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
