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

//! src/core/types.rs
//!
//! Question model shared by the API client, the CLI and the GUI
//!
//! This module defines:
//! - `QuestionType`: The four question kinds the platform supports
//! - `Question`: A flat question record exactly as the remote API stores it
//! - `QuestionPayload`: A typed view over the type-specific fields
//! - `QuestionParent`: Where a new question is attached (subject or exam section)
//!
//! Questions are stored as loose JSON documents remotely. `Question` keeps
//! every field it does not know about in `extra`, so a question that is read,
//! edited and written back loses nothing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Errors produced when parsing type tags and parent strings
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// Type tag is not one of the four known question types
    #[error("Unknown question type '{0}'")]
    UnknownQuestionType(String),

    /// Parent string was empty
    #[error("Parent cannot be empty")]
    EmptyParent,

    /// Exam parent without an exam number
    #[error("Exam parent '{0}' has no exam number")]
    MissingExamNumber(String),

    /// Exam parent without Gevaarherkenning/Inzicht/Kennis
    #[error("Invalid exam type in '{0}': must include 'Gevaarherkenning', 'Inzicht' or 'Kennis'")]
    UnknownExamCategory(String),
}

/// Kind of question
///
/// The wire tag (`multiple_choice`, `open`, ...) is what the API stores in
/// the `type` field of each question document.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Pick one answer from lettered options
    #[default]
    MultipleChoice,
    /// Free numeric or text answer, optionally with a unit
    Open,
    /// Pick the correct image from a set
    ImageSelection,
    /// Drag items onto the correct positions of an image
    DragAndDrop,
}

impl QuestionType {
    /// All question types, in the order the type picker shows them
    pub const ALL: [QuestionType; 4] = [
        QuestionType::MultipleChoice,
        QuestionType::Open,
        QuestionType::ImageSelection,
        QuestionType::DragAndDrop,
    ];

    /// Wire tag stored in the `type` field
    pub fn tag(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::Open => "open",
            QuestionType::ImageSelection => "image_selection",
            QuestionType::DragAndDrop => "drag_and_drop",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Multiple choice",
            QuestionType::Open => "Open question",
            QuestionType::ImageSelection => "Image selection",
            QuestionType::DragAndDrop => "Drag and drop",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for QuestionType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionType::ALL
            .into_iter()
            .find(|kind| kind.tag() == s.trim())
            .ok_or_else(|| ParseError::UnknownQuestionType(s.to_string()))
    }
}

/// Exam category
///
/// Every exam groups its questions into three categories, stored remotely
/// under the Dutch field names.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ExamCategory {
    /// Hazard perception
    #[serde(rename = "gevaarherkenning")]
    HazardPerception,
    /// Insight
    #[serde(rename = "inzicht")]
    Insight,
    /// Knowledge
    #[serde(rename = "kennis")]
    Knowledge,
}

impl ExamCategory {
    /// All categories in exam order
    pub const ALL: [ExamCategory; 3] = [
        ExamCategory::HazardPerception,
        ExamCategory::Insight,
        ExamCategory::Knowledge,
    ];

    /// Field name in the exam document
    pub fn field(&self) -> &'static str {
        match self {
            ExamCategory::HazardPerception => "gevaarherkenning",
            ExamCategory::Insight => "inzicht",
            ExamCategory::Knowledge => "kennis",
        }
    }

    /// Label used in parent strings and headers
    pub fn label(&self) -> &'static str {
        match self {
            ExamCategory::HazardPerception => "Gevaarherkenning",
            ExamCategory::Insight => "Inzicht",
            ExamCategory::Knowledge => "Kennis",
        }
    }
}

impl fmt::Display for ExamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Location a new question is attached to
///
/// The API identifies the parent with a single string: either a subject
/// title, or `"Examen <n>: <Category>"` for an exam section.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum QuestionParent {
    /// Subject, identified by its title
    Subject(String),
    /// Exam section
    Exam {
        /// Exam document id (the exam number)
        number: String,
        /// Section within the exam
        category: ExamCategory,
    },
}

impl fmt::Display for QuestionParent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionParent::Subject(title) => write!(f, "{}", title),
            QuestionParent::Exam { number, category } => {
                write!(f, "Examen {}: {}", number, category.label())
            }
        }
    }
}

impl FromStr for QuestionParent {
    type Err = ParseError;

    /// Parses a parent string the same way the API does
    ///
    /// Anything containing "Examen" is an exam section: the first run of
    /// digits is the exam number and the category keyword picks the section.
    /// Everything else is a subject title.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::EmptyParent);
        }

        if !s.contains("Examen") {
            return Ok(QuestionParent::Subject(s.to_string()));
        }

        let number = s
            .split(|c: char| !c.is_ascii_digit())
            .find(|part| !part.is_empty())
            .ok_or_else(|| ParseError::MissingExamNumber(s.to_string()))?;

        let category = ExamCategory::ALL
            .into_iter()
            .find(|category| s.contains(category.label()))
            .ok_or_else(|| ParseError::UnknownExamCategory(s.to_string()))?;

        Ok(QuestionParent::Exam {
            number: number.to_string(),
            category,
        })
    }
}

/// Correct answer reference
///
/// Multiple choice questions store a letter or option text, image selection
/// questions store a zero-based index.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerKey {
    /// Zero-based option index
    Index(u64),
    /// Option letter or text
    Text(String),
}

/// Answer to an open question
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OpenAnswer {
    /// Numeric answer (e.g. a speed limit)
    Number(Number),
    /// Text answer
    Text(String),
}

impl OpenAnswer {
    /// Parses editor input, preferring a number when the text is numeric
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Ok(int) = input.parse::<i64>() {
            return Some(OpenAnswer::Number(Number::from(int)));
        }

        match input.parse::<f64>().ok().and_then(Number::from_f64) {
            Some(number) => Some(OpenAnswer::Number(number)),
            None => Some(OpenAnswer::Text(input.to_string())),
        }
    }
}

impl fmt::Display for OpenAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenAnswer::Number(number) => write!(f, "{}", number),
            OpenAnswer::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Point on a question image (drag and drop targets)
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Position {
    /// Horizontal offset in pixels
    #[serde(rename = "positionX")]
    pub x: f64,
    /// Vertical offset in pixels
    #[serde(rename = "positionY")]
    pub y: f64,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A question document
///
/// Field presence depends on `kind`:
/// - `MultipleChoice`: `options` (or legacy `answers`) + `correct` (or a
///   text `correct_answer`)
/// - `Open`: `answer`, optionally `unit`
/// - `ImageSelection`: `image_options` + an index `correct_answer`
/// - `DragAndDrop`: `correct_positions`
///
/// # Example
/// ```ignore
/// let question: Question = serde_json::from_str(r#"{
///     "question": "Wat is de maximumsnelheid op deze weg?",
///     "type": "open",
///     "answer": 50,
///     "unit": "KM/U"
/// }"#)?;
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Document id (absent until the question is created)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Question text shown to the student
    #[serde(rename = "question", default)]
    pub text: String,

    /// Question type tag
    #[serde(rename = "type", default)]
    pub kind: QuestionType,

    /// Answer options
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// Answer options as stored by older documents
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<String>,

    /// Correct option letter for multiple choice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<String>,

    /// Correct answer reference (letter/text or image index)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<AnswerKey>,

    /// Expected answer for open questions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<OpenAnswer>,

    /// Unit appended to an open answer (e.g. "KM/U")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Image URLs for image selection
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_options: Vec<String>,

    /// Target positions for drag and drop
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub correct_positions: Vec<Position>,

    /// Explanation shown after answering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// Main question image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Extra situational context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Glossary terms referenced by the question
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub terms: Vec<String>,

    /// Start positions of draggable items
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positions: Vec<Position>,

    /// Parent string, only sent when creating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Fields this client does not model (timestamps etc.)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Typed view of the type-specific part of a question
#[derive(Clone, Debug, PartialEq)]
pub enum QuestionPayload {
    /// Lettered options with the correct letter
    MultipleChoice {
        options: Vec<String>,
        correct: Option<String>,
    },
    /// Expected answer and unit
    Open {
        answer: Option<OpenAnswer>,
        unit: Option<String>,
    },
    /// Candidate images with the correct (zero-based) index
    ImageSelection {
        image_options: Vec<String>,
        correct_index: Option<usize>,
    },
    /// Correct drop positions
    DragAndDrop { correct_positions: Vec<Position> },
}

impl Question {
    /// Creates an empty question of the given type
    pub fn new(kind: QuestionType, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
            ..Default::default()
        }
    }

    /// Answer options for multiple choice
    ///
    /// Prefers `options`, falls back to the legacy `answers` key.
    pub fn choice_options(&self) -> &[String] {
        if self.options.is_empty() {
            &self.answers
        } else {
            &self.options
        }
    }

    /// True when the choices live under the legacy keys
    ///
    /// Updates merge into the stored document, so edits must be written
    /// back under the same keys or the document ends up holding both.
    pub fn uses_legacy_choice_keys(&self) -> bool {
        self.options.is_empty() && !self.answers.is_empty()
    }

    /// Correct option for multiple choice
    ///
    /// Prefers `correct`, falls back to a text `correctAnswer`.
    pub fn correct_choice(&self) -> Option<String> {
        self.correct.clone().or_else(|| match &self.correct_answer {
            Some(AnswerKey::Text(text)) => Some(text.clone()),
            _ => None,
        })
    }

    /// Correct image index for image selection
    pub fn correct_index(&self) -> Option<usize> {
        match self.correct_answer {
            Some(AnswerKey::Index(index)) => usize::try_from(index).ok(),
            _ => None,
        }
    }

    /// Returns the typed view determined by the type tag
    pub fn payload(&self) -> QuestionPayload {
        match self.kind {
            QuestionType::MultipleChoice => QuestionPayload::MultipleChoice {
                options: self.choice_options().to_vec(),
                correct: self.correct_choice(),
            },
            QuestionType::Open => QuestionPayload::Open {
                answer: self.answer.clone(),
                unit: self.unit.clone(),
            },
            QuestionType::ImageSelection => QuestionPayload::ImageSelection {
                image_options: self.image_options.clone(),
                correct_index: self.correct_index(),
            },
            QuestionType::DragAndDrop => QuestionPayload::DragAndDrop {
                correct_positions: self.correct_positions.clone(),
            },
        }
    }

    /// Drops every type-specific field
    ///
    /// Used when the editor switches a question to another type.
    pub fn clear_payload(&mut self) {
        self.options.clear();
        self.answers.clear();
        self.correct = None;
        self.correct_answer = None;
        self.answer = None;
        self.unit = None;
        self.image_options.clear();
        self.correct_positions.clear();
    }
}
