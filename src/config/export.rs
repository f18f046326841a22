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

//! Atomic catalog snapshots
//!
//! `export` writes the loaded catalog as pretty-printed JSON. The write goes
//! through a temporary file and a rename, so an interrupted export never
//! leaves a truncated snapshot behind.

use atomic_write_file::AtomicWriteFile;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use super::error::SettingsError;
use crate::core::{Catalog, Feedback};

/// What gets written to disk
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    /// Local time of the export (RFC 3339)
    pub exported_at: String,
    pub question_count: usize,
    pub catalog: &'a Catalog,
    pub feedback: &'a [Feedback],
}

/// Writes a snapshot of `catalog` (and optionally feedback) to `path`.
///
/// # Returns
///
/// * `Ok(usize)` - Bytes written
/// * `Err(SettingsError)` - Serialisation or atomic write failed
pub fn export_snapshot(
    path: &Path,
    catalog: &Catalog,
    feedback: &[Feedback],
) -> Result<usize, SettingsError> {
    let snapshot = Snapshot {
        exported_at: chrono::Local::now().to_rfc3339(),
        question_count: catalog.question_count(),
        catalog,
        feedback,
    };

    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| SettingsError::WriteFailed(format!("Failed to serialise catalog: {}", e)))?;

    let mut file = AtomicWriteFile::options().open(path).map_err(|e| {
        SettingsError::WriteFailed(format!("Failed to open for atomic write: {}", e))
    })?;

    file.write_all(json.as_bytes())
        .map_err(|e| SettingsError::WriteFailed(format!("Failed to write content: {}", e)))?;

    file.commit().map_err(|e| {
        SettingsError::WriteFailed(format!("Failed to commit atomic write: {}", e))
    })?;

    tracing::info!(path = %path.display(), bytes = json.len(), "Catalog exported");
    Ok(json.len())
}
