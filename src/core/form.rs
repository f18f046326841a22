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

//! Editor form state
//!
//! `QuestionForm` mirrors the text fields of the question editor. The GTK
//! dialog only copies strings in and out of it, so the conversion and its
//! error cases are tested without a display.

use thiserror::Error;

use crate::core::types::{AnswerKey, OpenAnswer, Position, Question, QuestionType};
use crate::core::validator::{validate_question, ValidationError};

/// Problems turning form input into a question
#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    /// A position line is not an `x,y` pair
    #[error("Line {line}: '{value}' is not a position (expected x,y)")]
    InvalidPosition { line: usize, value: String },

    /// Correct image is not a number from 1 upwards
    #[error("'{0}' is not a valid image number")]
    InvalidImageNumber(String),

    /// Fields parsed but the question is incomplete
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Raw editor input
///
/// List fields hold one entry per line. `correct_image` is 1-based because
/// that is what authors see next to the image list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuestionForm {
    pub text: String,
    pub explanation: String,
    pub image: String,
    pub context: String,
    /// Comma separated
    pub terms: String,
    pub options: String,
    pub correct: String,
    pub answer: String,
    pub unit: String,
    pub image_options: String,
    pub correct_image: String,
    pub correct_positions: String,
}

impl QuestionForm {
    /// Fills the form from an existing question
    pub fn from_question(question: &Question) -> Self {
        Self {
            text: question.text.clone(),
            explanation: question.explanation.clone().unwrap_or_default(),
            image: question.image.clone().unwrap_or_default(),
            context: question.context.clone().unwrap_or_default(),
            terms: question.terms.join(", "),
            options: question.choice_options().join("\n"),
            correct: question.correct_choice().unwrap_or_default(),
            answer: question
                .answer
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            unit: question.unit.clone().unwrap_or_default(),
            image_options: question.image_options.join("\n"),
            correct_image: question
                .correct_index()
                .map(|index| (index + 1).to_string())
                .unwrap_or_default(),
            correct_positions: question
                .correct_positions
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Builds a question of type `kind` from the form
    ///
    /// When `base` is given its id and unknown fields are carried over, so
    /// an update only touches what the editor shows. Fields belonging to
    /// other question types are dropped.
    ///
    /// # Returns
    ///
    /// * `Ok(Question)` - Parsed and validated question
    /// * `Err(FormError)` - Unparseable field or failed validation
    pub fn to_question(
        &self,
        kind: QuestionType,
        base: Option<&Question>,
    ) -> Result<Question, FormError> {
        let legacy_choices = base.is_some_and(Question::uses_legacy_choice_keys);
        let legacy_correct = base.is_some_and(|b| {
            b.correct.is_none() && matches!(b.correct_answer, Some(AnswerKey::Text(_)))
        });

        let mut question = base.cloned().unwrap_or_default();
        question.clear_payload();
        question.kind = kind;
        question.text = self.text.trim().to_string();
        question.explanation = non_empty(&self.explanation);
        question.image = non_empty(&self.image);
        question.context = non_empty(&self.context);
        question.terms = self
            .terms
            .split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(String::from)
            .collect();

        match kind {
            QuestionType::MultipleChoice => {
                let options = lines(&self.options);
                let correct = non_empty(&self.correct);
                if legacy_choices {
                    question.answers = options;
                } else {
                    question.options = options;
                }
                if legacy_correct {
                    question.correct_answer = correct.map(AnswerKey::Text);
                } else {
                    question.correct = correct;
                }
            }
            QuestionType::Open => {
                question.answer = OpenAnswer::parse(&self.answer);
                question.unit = non_empty(&self.unit);
            }
            QuestionType::ImageSelection => {
                question.image_options = lines(&self.image_options);
                question.correct_answer = parse_image_number(&self.correct_image)?
                    .map(|index| AnswerKey::Index(index as u64));
            }
            QuestionType::DragAndDrop => {
                question.correct_positions = parse_positions(&self.correct_positions)?;
            }
        }

        validate_question(&question)?;
        Ok(question)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn lines(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// 1-based image number to a zero-based index; blank means "not chosen"
fn parse_image_number(value: &str) -> Result<Option<usize>, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    match value.parse::<usize>() {
        Ok(number) if number >= 1 => Ok(Some(number - 1)),
        _ => Err(FormError::InvalidImageNumber(value.to_string())),
    }
}

fn parse_positions(value: &str) -> Result<Vec<Position>, FormError> {
    value
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let invalid = || FormError::InvalidPosition {
                line: i + 1,
                value: line.trim().to_string(),
            };
            let (x, y) = line.split_once(',').ok_or_else(invalid)?;
            let x = x.trim().parse::<f64>().map_err(|_| invalid())?;
            let y = y.trim().parse::<f64>().map_err(|_| invalid())?;
            Ok(Position { x, y })
        })
        .collect()
}
