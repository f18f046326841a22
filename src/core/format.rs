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

//! Display formatting for questions, timestamps and detail rows
//!
//! Everything here is pure string work so the GUI and the CLI render the
//! same text and the formatting can be tested without a display server.

use chrono::{DateTime, Local, TimeZone};
use serde_json::Value;
use std::fmt;

use crate::core::feedback::FirestoreTimestamp;
use crate::core::types::{Question, QuestionPayload, QuestionType};

/// Date format used for feedback timestamps
pub const DATE_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Summary row for a question in a list
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuestionSummary {
    /// "Question <n>" (1-based)
    pub title: String,
    /// Question text
    pub text: String,
    /// Raw type tag as stored, empty when missing
    pub kind_tag: String,
    /// Parsed type tag, `None` if missing or unknown
    pub kind: Option<QuestionType>,
}

impl QuestionSummary {
    /// Type label for display, falling back to the raw tag
    pub fn kind_label(&self) -> &str {
        match self.kind {
            Some(kind) => kind.label(),
            None if self.kind_tag.is_empty() => "Unknown",
            None => &self.kind_tag,
        }
    }
}

/// Maps a raw API question document to its summary row
///
/// # Arguments
///
/// * `index` - Zero-based position of the question in its section
/// * `raw` - Question document as returned by the API
///
/// # Example
///
/// ```
/// use theorio_admin::core::format::format_question;
/// use theorio_admin::core::QuestionType;
///
/// let raw = serde_json::json!({"id": "q1", "question": "Test vraag", "type": "multiple_choice"});
/// let summary = format_question(0, &raw);
/// assert_eq!(summary.title, "Question 1");
/// assert_eq!(summary.kind, Some(QuestionType::MultipleChoice));
/// ```
pub fn format_question(index: usize, raw: &Value) -> QuestionSummary {
    let text = raw
        .get("question")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let kind_tag = raw
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    QuestionSummary {
        title: format!("Question {}", index + 1),
        text,
        kind: kind_tag.parse().ok(),
        kind_tag,
    }
}

/// Summary row for an already parsed question
pub fn summarize(index: usize, question: &Question) -> QuestionSummary {
    QuestionSummary {
        title: format!("Question {}", index + 1),
        text: question.text.clone(),
        kind_tag: question.kind.tag().to_string(),
        kind: Some(question.kind),
    }
}

/// Formats a timestamp in the local time zone
pub fn format_timestamp(timestamp: &FirestoreTimestamp) -> String {
    format_timestamp_in(timestamp, &Local)
}

/// Formats a timestamp in an explicit time zone
///
/// Returns an empty string for timestamps chrono cannot represent.
pub fn format_timestamp_in<Tz>(timestamp: &FirestoreTimestamp, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match DateTime::from_timestamp(timestamp.seconds, timestamp.nanoseconds) {
        Some(utc) => utc.with_timezone(tz).format(DATE_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Formats a raw `{"_seconds": ..}` value, or "" if it isn't one
pub fn format_raw_timestamp(raw: &Value) -> String {
    serde_json::from_value::<FirestoreTimestamp>(raw.clone())
        .map(|timestamp| format_timestamp(&timestamp))
        .unwrap_or_default()
}

/// Shortens `text` to `max` characters, appending an ellipsis
pub fn truncate_preview(text: &str, max: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= max {
        return single_line;
    }

    let mut preview: String = single_line.chars().take(max).collect();
    preview.push('…');
    preview
}

/// Letter for an option index (0 → 'A')
pub fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .filter(u8::is_ascii_uppercase)
        .map(char::from)
        .unwrap_or('?')
}

/// Renders the label/value rows of the details panel
///
/// Rows depend on the question type; optional fields (explanation, image,
/// context, terms) are only included when present.
pub fn question_detail_lines(question: &Question) -> Vec<(&'static str, String)> {
    let mut lines = vec![
        ("Type", question.kind.label().to_string()),
        ("Question", question.text.clone()),
    ];

    match question.payload() {
        QuestionPayload::MultipleChoice { options, correct } => {
            let options = options
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    // Options like "A: Remmen" already carry their letter
                    if option.starts_with(&format!("{}:", option_letter(i))) {
                        option.clone()
                    } else {
                        format!("{}: {}", option_letter(i), option)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n");
            lines.push(("Options", options));
            lines.push(("Correct", correct.unwrap_or_else(|| "(not set)".to_string())));
        }
        QuestionPayload::Open { answer, unit } => {
            let answer = match (answer, unit) {
                (Some(answer), Some(unit)) => format!("{} {}", answer, unit),
                (Some(answer), None) => answer.to_string(),
                (None, _) => "(not set)".to_string(),
            };
            lines.push(("Answer", answer));
        }
        QuestionPayload::ImageSelection {
            image_options,
            correct_index,
        } => {
            let images = image_options
                .iter()
                .enumerate()
                .map(|(i, url)| format!("{}. {}", i + 1, url))
                .collect::<Vec<_>>()
                .join("\n");
            lines.push(("Images", images));
            lines.push((
                "Correct image",
                correct_index
                    .map(|i| format!("Image {}", i + 1))
                    .unwrap_or_else(|| "(not set)".to_string()),
            ));
        }
        QuestionPayload::DragAndDrop { correct_positions } => {
            let positions = correct_positions
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            lines.push(("Positions", positions));
        }
    }

    if let Some(explanation) = question.explanation.as_deref().filter(|s| !s.is_empty()) {
        lines.push(("Explanation", explanation.to_string()));
    }
    if let Some(image) = question.image.as_deref().filter(|s| !s.is_empty()) {
        lines.push(("Image", image.to_string()));
    }
    if let Some(context) = question.context.as_deref().filter(|s| !s.is_empty()) {
        lines.push(("Context", context.to_string()));
    }
    if !question.terms.is_empty() {
        lines.push(("Terms", question.terms.join(", ")));
    }

    lines
}
