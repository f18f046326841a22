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

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading settings or writing exports.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Explicit settings file does not exist.
    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),

    /// A source could not be read or merged.
    #[error("Failed to load settings: {0}")]
    Load(String),

    /// Merged values do not fit the settings structure.
    #[error("Failed to parse settings: {0}")]
    Parse(String),

    /// Values parsed but are not usable.
    #[error("Invalid settings: {0}")]
    Invalid(String),

    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),

    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for SettingsError {
    fn from(err: config::ConfigError) -> Self {
        SettingsError::Load(err.to_string())
    }
}
