// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Layered settings loading
//!
//! Priority, highest first:
//! 1. Legacy `API_URL` / `API_KEY` variables
//! 2. `THEORIO_` environment variables (`__` separates levels)
//! 3. Settings file (`theorio.toml` / `theorio.local.toml`, or an explicit path)
//! 4. Defaults

use config::{Config, Environment, File};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::error::SettingsError;
use super::Settings;

/// Settings files searched in the working directory when no path is given
const SETTINGS_FILE_NAMES: &[&str] = &["theorio", "theorio.local"];

/// Largest page size the API accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Loads settings from the default sources and the process environment.
///
/// # Arguments
///
/// * `path` - Explicit settings file (`~` is expanded), or `None` to search
///   the working directory
///
/// # Returns
///
/// * `Ok(Settings)` - Merged and validated settings
/// * `Err(SettingsError)` - Missing file, bad value or failed validation
///
/// # Example
///
/// ```no_run
/// use theorio_admin::config::load_settings;
///
/// let settings = load_settings(None)?;
/// println!("Using API at {}", settings.api.url);
/// # Ok::<(), theorio_admin::config::SettingsError>(())
/// ```
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    load_settings_from(path, std::env::vars().collect())
}

/// Loads settings using `env` instead of the process environment.
pub fn load_settings_from(
    path: Option<&Path>,
    env: HashMap<String, String>,
) -> Result<Settings, SettingsError> {
    let mut builder = Config::builder()
        .set_default("api.url", "http://127.0.0.1:5001")?
        .set_default("api.key", "")?
        .set_default("api.timeout_secs", 30)?
        .set_default("api.page_size", 50)?
        .set_default("log.level", "info")?;

    if let Some(path) = path {
        let path = expand_path(path);
        if !path.exists() {
            return Err(SettingsError::NotFound(path));
        }
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in SETTINGS_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    builder = builder
        .add_source(
            Environment::with_prefix("THEORIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone())),
        )
        .set_override_option("api.url", non_empty(env.get("API_URL")))?
        .set_override_option("api.key", non_empty(env.get("API_KEY")))?;

    let settings: Settings = builder
        .build()?
        .try_deserialize()
        .map_err(|e| SettingsError::Parse(e.to_string()))?;

    validate_settings(&settings)?;

    tracing::debug!(url = %settings.api.url, "Settings loaded");
    Ok(settings)
}

/// Checks that merged settings are usable.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    let url = settings.api.url.trim();
    if url.is_empty() {
        return Err(SettingsError::Invalid("API URL cannot be empty".to_string()));
    }
    reqwest::Url::parse(url)
        .map_err(|e| SettingsError::Invalid(format!("API URL '{}' is not valid: {}", url, e)))?;

    if settings.api.key.trim().is_empty() {
        return Err(SettingsError::Invalid(
            "API key is not set (use THEORIO_API__KEY or API_KEY)".to_string(),
        ));
    }

    if settings.api.timeout_secs == 0 {
        return Err(SettingsError::Invalid("Timeout cannot be 0".to_string()));
    }

    if settings.api.page_size == 0 || settings.api.page_size > MAX_PAGE_SIZE {
        return Err(SettingsError::Invalid(format!(
            "Page size must be between 1 and {} (got {})",
            MAX_PAGE_SIZE, settings.api.page_size
        )));
    }

    Ok(())
}

fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}
