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

//! Core domain logic
//!
//! Data structures and pure functions for the question catalog:
//! - Question, parent and type definitions
//! - The subject/exam catalog tree the views render
//! - Feedback records and moderation states
//! - Display formatting and editor form conversion
//! - Question validation
//!
//! Nothing in here performs I/O, so all of it is unit tested without a
//! network or a display server.

pub mod catalog;
pub mod feedback;
pub mod form;
pub mod format;
pub mod types;
pub mod validator;

pub use catalog::{Catalog, CatalogNode, Exam, ExamSection, Pagination, Subject};
pub use feedback::{filter_feedback, Feedback, FeedbackStatus, FirestoreTimestamp};
pub use form::{FormError, QuestionForm};
pub use format::{format_question, QuestionSummary};
pub use types::*;
pub use validator::{validate_new_question, validate_question, ValidationError};

#[cfg(test)]
mod tests;
