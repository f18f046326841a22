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

use super::super::*;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper: Writes a settings file and returns its path.
fn write_settings(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("theorio.toml");
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_defaults_with_key_from_env() {
    let settings = load_settings_from(None, env(&[("THEORIO_API__KEY", "secret")])).unwrap();

    assert_eq!(settings.api.url, "http://127.0.0.1:5001");
    assert_eq!(settings.api.key, "secret");
    assert_eq!(settings.api.timeout_secs, 30);
    assert_eq!(settings.api.page_size, 50);
    assert_eq!(settings.log.level, "info");
}

#[test]
fn test_file_values() {
    let (_temp_dir, path) = write_settings(
        r#"
[api]
url = "https://example.test/api"
key = "from-file"
page_size = 100

[log]
level = "debug"
"#,
    );

    let settings = load_settings_from(Some(&path), HashMap::new()).unwrap();
    assert_eq!(settings.api.url, "https://example.test/api");
    assert_eq!(settings.api.key, "from-file");
    assert_eq!(settings.api.page_size, 100);
    assert_eq!(settings.api.timeout_secs, 30, "Unset values keep defaults");
    assert_eq!(settings.log.level, "debug");
}

#[test]
fn test_env_overrides_file() {
    let (_temp_dir, path) = write_settings("[api]\nkey = \"from-file\"\ntimeout_secs = 10\n");

    let settings = load_settings_from(
        Some(&path),
        env(&[("THEORIO_API__TIMEOUT_SECS", "5")]),
    )
    .unwrap();

    assert_eq!(settings.api.timeout_secs, 5);
    assert_eq!(settings.api.key, "from-file");
}

#[test]
fn test_legacy_variables_win() {
    let settings = load_settings_from(
        None,
        env(&[
            ("THEORIO_API__URL", "http://ignored.test"),
            ("THEORIO_API__KEY", "ignored"),
            ("API_URL", "https://legacy.test"),
            ("API_KEY", "legacy-key"),
        ]),
    )
    .unwrap();

    assert_eq!(settings.api.url, "https://legacy.test");
    assert_eq!(settings.api.key, "legacy-key");
}

#[test]
fn test_blank_legacy_variable_is_ignored() {
    let settings = load_settings_from(
        None,
        env(&[("THEORIO_API__KEY", "secret"), ("API_KEY", "  ")]),
    )
    .unwrap();

    assert_eq!(settings.api.key, "secret");
}

#[test]
fn test_missing_explicit_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.toml");

    match load_settings_from(Some(&path), HashMap::new()) {
        Err(SettingsError::NotFound(missing)) => assert_eq!(missing, path),
        other => panic!("Expected NotFound error, got: {:?}", other),
    }
}

#[test]
fn test_missing_key_rejected() {
    let result = load_settings_from(None, HashMap::new());
    assert!(matches!(result, Err(SettingsError::Invalid(_))));
}

#[test]
fn test_invalid_url_rejected() {
    let result = load_settings_from(
        None,
        env(&[("API_URL", "not a url"), ("API_KEY", "secret")]),
    );
    assert!(matches!(result, Err(SettingsError::Invalid(msg)) if msg.contains("not valid")));
}

#[test]
fn test_page_size_bounds() {
    let mut settings = load_settings_from(None, env(&[("API_KEY", "secret")])).unwrap();

    settings.api.page_size = 101;
    assert!(validate_settings(&settings).is_err());

    settings.api.page_size = 0;
    assert!(validate_settings(&settings).is_err());

    settings.api.page_size = 1;
    assert!(validate_settings(&settings).is_ok());
}

#[test]
fn test_zero_timeout_rejected() {
    let result = load_settings_from(
        None,
        env(&[("API_KEY", "secret"), ("THEORIO_API__TIMEOUT_SECS", "0")]),
    );
    assert!(matches!(result, Err(SettingsError::Invalid(_))));
}

#[test]
fn test_debug_redacts_key() {
    let settings = load_settings_from(None, env(&[("API_KEY", "super-secret")])).unwrap();
    let debug = format!("{:?}", settings);

    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("<redacted>"));
}
