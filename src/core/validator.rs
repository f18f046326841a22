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

//! Question validation
//!
//! Checks a question before it is sent to the API. The API only enforces
//! `question`, `type` and `parent` on create; everything else here keeps
//! half-filled questions out of the live course.

use thiserror::Error;

use crate::core::format::option_letter;
use crate::core::types::{Question, QuestionParent, QuestionPayload};

/// Minimum number of options for a multiple choice question
pub const MIN_OPTIONS: usize = 2;

/// Minimum number of candidate images for an image selection question
pub const MIN_IMAGES: usize = 2;

/// Reasons a question is rejected
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Question text cannot be empty")]
    EmptyText,

    #[error("Multiple choice questions need at least 2 options (found {0})")]
    TooFewOptions(usize),

    #[error("No correct answer selected")]
    MissingCorrectAnswer,

    #[error("Correct answer '{0}' does not match any option")]
    UnknownCorrectAnswer(String),

    #[error("Open questions need an answer")]
    MissingAnswer,

    #[error("Image selection questions need at least 2 images (found {0})")]
    TooFewImages(usize),

    #[error("Correct image {index} is out of range (only {count} images)")]
    ImageIndexOutOfRange { index: usize, count: usize },

    #[error("Drag and drop questions need at least one position")]
    MissingPositions,

    #[error("Parent cannot be empty")]
    MissingParent,
}

/// Validates a question's text and type-specific fields
///
/// # Returns
///
/// * `Ok(())` - Question can be sent
/// * `Err(ValidationError)` - First problem found
pub fn validate_question(question: &Question) -> Result<(), ValidationError> {
    if question.text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }

    match question.payload() {
        QuestionPayload::MultipleChoice { options, correct } => {
            validate_choice(&options, correct.as_deref())
        }
        QuestionPayload::Open { answer, .. } => {
            let blank = answer
                .as_ref()
                .is_none_or(|answer| answer.to_string().trim().is_empty());
            if blank {
                return Err(ValidationError::MissingAnswer);
            }
            Ok(())
        }
        QuestionPayload::ImageSelection {
            image_options,
            correct_index,
        } => {
            let count = image_options.len();
            if count < MIN_IMAGES {
                return Err(ValidationError::TooFewImages(count));
            }
            match correct_index {
                None => Err(ValidationError::MissingCorrectAnswer),
                Some(index) if index >= count => {
                    Err(ValidationError::ImageIndexOutOfRange { index, count })
                }
                Some(_) => Ok(()),
            }
        }
        QuestionPayload::DragAndDrop { correct_positions } => {
            if correct_positions.is_empty() {
                return Err(ValidationError::MissingPositions);
            }
            Ok(())
        }
    }
}

/// Validates a question that is about to be created under `parent`
pub fn validate_new_question(
    question: &Question,
    parent: &QuestionParent,
) -> Result<(), ValidationError> {
    if parent.to_string().trim().is_empty() {
        return Err(ValidationError::MissingParent);
    }
    validate_question(question)
}

fn validate_choice(options: &[String], correct: Option<&str>) -> Result<(), ValidationError> {
    let filled = options.iter().filter(|o| !o.trim().is_empty()).count();
    if filled < MIN_OPTIONS {
        return Err(ValidationError::TooFewOptions(filled));
    }

    let correct = correct
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(ValidationError::MissingCorrectAnswer)?;

    let matches = options.iter().enumerate().any(|(i, option)| {
        let letter = option_letter(i).to_string();
        correct.eq_ignore_ascii_case(&letter) || correct == option.trim()
    });

    if matches {
        Ok(())
    } else {
        Err(ValidationError::UnknownCorrectAnswer(correct.to_string()))
    }
}
