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

use crate::core::feedback::FirestoreTimestamp;
use crate::core::format::{
    format_question, format_raw_timestamp, format_timestamp_in, option_letter,
    question_detail_lines, summarize, truncate_preview,
};
use crate::core::types::{AnswerKey, OpenAnswer, Position, Question, QuestionType};
use chrono::{FixedOffset, Utc};
use serde_json::json;

#[test]
fn test_format_question_display_record() {
    let raw = json!({"id": "q1", "question": "Test vraag", "type": "multiple_choice"});
    let summary = format_question(0, &raw);

    assert_eq!(summary.title, "Question 1");
    assert_eq!(summary.text, "Test vraag");
    assert_eq!(summary.kind, Some(QuestionType::MultipleChoice));
    assert_eq!(summary.kind_tag, "multiple_choice");
    assert_eq!(summary.kind_label(), "Multiple choice");
}

#[test]
fn test_format_question_missing_fields() {
    let summary = format_question(4, &json!({"question": 42, "type": "poll"}));

    assert_eq!(summary.title, "Question 5");
    assert_eq!(summary.text, "");
    assert_eq!(summary.kind, None);
    assert_eq!(summary.kind_tag, "poll");
    assert_eq!(summary.kind_label(), "poll");
}

#[test]
fn test_format_question_without_type() {
    let summary = format_question(0, &json!({"question": "Geen type"}));

    assert_eq!(summary.kind_tag, "");
    assert_eq!(summary.kind_label(), "Unknown");
}

#[test]
fn test_summarize_parsed_question() {
    let question = Question::new(QuestionType::Open, "Hoe hard?");
    let summary = summarize(2, &question);
    assert_eq!(summary.title, "Question 3");
    assert_eq!(summary.kind, Some(QuestionType::Open));
}

#[test]
fn test_format_timestamp_utc() {
    let ts = FirestoreTimestamp {
        seconds: 1_700_000_000,
        nanoseconds: 0,
    };
    assert_eq!(format_timestamp_in(&ts, &Utc), "14-11-2023 22:13");
}

#[test]
fn test_format_timestamp_offset() {
    let ts = FirestoreTimestamp {
        seconds: 0,
        nanoseconds: 0,
    };
    let amsterdam_winter = FixedOffset::east_opt(3600).unwrap();
    assert_eq!(format_timestamp_in(&ts, &amsterdam_winter), "01-01-1970 01:00");
}

#[test]
fn test_format_raw_timestamp_invalid() {
    assert_eq!(format_raw_timestamp(&json!({"nanos": 5})), "");
    assert_eq!(format_raw_timestamp(&json!("yesterday")), "");
    assert_eq!(format_raw_timestamp(&json!(null)), "");
}

#[test]
fn test_format_raw_timestamp_valid() {
    let formatted = format_raw_timestamp(&json!({"_seconds": 1_700_000_000, "_nanoseconds": 0}));
    assert_eq!(formatted.len(), "14-11-2023 22:13".len());
}

#[test]
fn test_truncate_preview() {
    assert_eq!(truncate_preview("kort", 10), "kort");
    assert_eq!(truncate_preview("abcdef", 3), "abc…");
    assert_eq!(truncate_preview("één\ntwee", 5), "één t…");
}

#[test]
fn test_option_letters() {
    assert_eq!(option_letter(0), 'A');
    assert_eq!(option_letter(3), 'D');
    assert_eq!(option_letter(25), 'Z');
    assert_eq!(option_letter(26), '?');
}

#[test]
fn test_detail_lines_multiple_choice() {
    let mut question = Question::new(QuestionType::MultipleChoice, "Wie gaat eerst?");
    question.options = vec!["A: Ik".to_string(), "De fietser".to_string()];
    question.correct = Some("B".to_string());
    question.explanation = Some("Fietsers van rechts".to_string());

    let lines = question_detail_lines(&question);

    assert_eq!(lines[0], ("Type", "Multiple choice".to_string()));
    assert_eq!(lines[2], ("Options", "A: Ik\nB: De fietser".to_string()));
    assert_eq!(lines[3], ("Correct", "B".to_string()));
    assert_eq!(lines[4], ("Explanation", "Fietsers van rechts".to_string()));
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_detail_lines_open_with_unit() {
    let mut question = Question::new(QuestionType::Open, "Maximumsnelheid?");
    question.answer = OpenAnswer::parse("50");
    question.unit = Some("KM/U".to_string());

    let lines = question_detail_lines(&question);
    assert!(lines.contains(&("Answer", "50 KM/U".to_string())));
}

#[test]
fn test_detail_lines_image_selection() {
    let mut question = Question::new(QuestionType::ImageSelection, "Welk bord?");
    question.image_options = vec!["a.png".to_string(), "b.png".to_string()];
    question.correct_answer = Some(AnswerKey::Index(1));

    let lines = question_detail_lines(&question);
    assert!(lines.contains(&("Images", "1. a.png\n2. b.png".to_string())));
    assert!(lines.contains(&("Correct image", "Image 2".to_string())));
}

#[test]
fn test_detail_lines_drag_and_drop() {
    let mut question = Question::new(QuestionType::DragAndDrop, "Sleep");
    question.correct_positions = vec![Position { x: 1.0, y: 2.5 }];
    question.terms = vec!["voorsorteren".to_string(), "invoegen".to_string()];

    let lines = question_detail_lines(&question);
    assert!(lines.contains(&("Positions", "(1, 2.5)".to_string())));
    assert!(lines.contains(&("Terms", "voorsorteren, invoegen".to_string())));
}
