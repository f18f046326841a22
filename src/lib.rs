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

//! Theorio Admin
//!
//! Authoring and moderation tool for the Theorio driving-theory course:
//! browse the subject and exam catalog, create, edit and delete questions,
//! and moderate student feedback, all through the course backend's HTTP API.
//!
//! # Features
//!
//! - **Catalog:** Subjects ("Onderdelen") and exams ("Examens") with their
//!   questions, flattened into one searchable tree
//! - **Question types:** Multiple choice, open answer, image selection and
//!   drag-and-drop, each validated before anything is sent
//! - **Feedback:** Status filtering and moderation
//! - **Non-blocking:** Requests run on a background worker thread; the UI
//!   polls for results
//! - **GTK4 Interface** (feature `gui`, on by default) and a CLI
//!
//! # Architecture
//!
//! - **`core`:** Domain types, catalog tree, formatting, validation, form
//!   conversion
//! - **`api`:** Endpoints, HTTP client, error mapping, background worker
//! - **`config`:** Settings loading and catalog snapshot export
//! - **`ui`:** Controller (MVC) and the GTK4 views
//!
//! # Examples
//!
//! ## Listing subjects
//!
//! ```no_run
//! use theorio_admin::api::ApiClient;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), theorio_admin::api::ApiError> {
//! let client = ApiClient::new("http://127.0.0.1:5001", "my-key", Duration::from_secs(30))?;
//! for subject in client.get_all_subjects().await? {
//!     println!("{} ({} questions)", subject.title, subject.questions.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Validating a question
//!
//! ```
//! use theorio_admin::core::{validate_question, Question, QuestionType, ValidationError};
//!
//! let question = Question::new(QuestionType::Open, "Hoe hard mag je hier rijden?");
//! assert_eq!(validate_question(&question), Err(ValidationError::MissingAnswer));
//! ```
//!
//! ## Using the GUI
//!
//! ```no_run
//! # #[cfg(feature = "gui")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use theorio_admin::api::ApiClient;
//! use theorio_admin::config::load_settings;
//! use theorio_admin::ui::App;
//!
//! let settings = load_settings(None)?;
//! let app = App::new(ApiClient::from_settings(&settings.api)?)?;
//! app.run(); // Blocks until window closes
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "gui"))]
//! # fn main() {}
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod api;
pub mod config;
pub mod core;
pub mod ui;

// Re-export commonly used types for convenience
pub use core::{Question, QuestionParent, QuestionType};
