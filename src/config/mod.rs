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

//! Application settings and catalog export.
//!
//! Settings are merged from defaults, an optional TOML file and the
//! environment, then validated before anything talks to the API:
//!
//! ```toml
//! [api]
//! url = "https://europe-west1-theorio.cloudfunctions.net"
//! key = "..."
//! timeout_secs = 30
//! page_size = 50
//!
//! [log]
//! level = "debug"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use theorio_admin::config::load_settings;
//! use std::path::Path;
//!
//! let settings = load_settings(Some(Path::new("~/.config/theorio/theorio.toml")))?;
//! assert!(settings.api.page_size <= 100);
//! # Ok::<(), theorio_admin::config::SettingsError>(())
//! ```

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub mod error;
pub mod export;
pub mod loader;

pub use error::SettingsError;
pub use export::export_snapshot;
pub use loader::{load_settings, load_settings_from, validate_settings};

/// All settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Settings {
    pub api: ApiSettings,
    pub log: LogSettings,
}

/// Remote API connection settings.
#[derive(Clone, Deserialize, PartialEq)]
pub struct ApiSettings {
    /// Base URL the endpoint paths are appended to.
    pub url: String,
    /// Value of the `x-api-key` header.
    pub key: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Page size for paginated list endpoints.
    pub page_size: u32,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Keeps the key out of logs
impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// Logging settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LogSettings {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
}

#[cfg(test)]
mod tests;
