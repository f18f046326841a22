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

use crate::core::types::{
    AnswerKey, ExamCategory, OpenAnswer, ParseError, Position, Question, QuestionParent,
    QuestionPayload, QuestionType,
};
use crate::core::catalog::SubjectsPage;
use serde_json::json;

#[test]
fn test_question_type_from_tag() {
    assert_eq!("open".parse::<QuestionType>(), Ok(QuestionType::Open));
    assert_eq!(
        "image_selection".parse::<QuestionType>(),
        Ok(QuestionType::ImageSelection)
    );
    assert_eq!(
        "essay".parse::<QuestionType>(),
        Err(ParseError::UnknownQuestionType("essay".to_string()))
    );
}

#[test]
fn test_question_type_labels() {
    let labels: Vec<&str> = QuestionType::ALL.iter().map(|t| t.label()).collect();
    assert_eq!(
        labels,
        vec!["Multiple choice", "Open question", "Image selection", "Drag and drop"]
    );
}

#[test]
fn test_parent_subject() {
    let parent: QuestionParent = "Verkeersborden".parse().unwrap();
    assert_eq!(parent, QuestionParent::Subject("Verkeersborden".to_string()));
    assert_eq!(parent.to_string(), "Verkeersborden");
}

#[test]
fn test_parent_exam_round_trip() {
    let parent: QuestionParent = "Examen 3: Inzicht".parse().unwrap();
    assert_eq!(
        parent,
        QuestionParent::Exam {
            number: "3".to_string(),
            category: ExamCategory::Insight,
        }
    );
    assert_eq!(parent.to_string(), "Examen 3: Inzicht");
}

#[test]
fn test_parent_exam_multi_digit() {
    let parent: QuestionParent = "Examen 12: Gevaarherkenning".parse().unwrap();
    assert_eq!(
        parent,
        QuestionParent::Exam {
            number: "12".to_string(),
            category: ExamCategory::HazardPerception,
        }
    );
}

#[test]
fn test_parent_errors() {
    assert_eq!("  ".parse::<QuestionParent>(), Err(ParseError::EmptyParent));
    assert!(matches!(
        "Examen: Kennis".parse::<QuestionParent>(),
        Err(ParseError::MissingExamNumber(_))
    ));
    assert!(matches!(
        "Examen 2: Theorie".parse::<QuestionParent>(),
        Err(ParseError::UnknownExamCategory(_))
    ));
}

#[test]
fn test_deserialize_multiple_choice_with_legacy_answers() {
    let question: Question = serde_json::from_value(json!({
        "id": "q1",
        "question": "Wie heeft voorrang?",
        "type": "multiple_choice",
        "answers": ["A: Ik", "B: De fietser"],
        "correctAnswer": "B"
    }))
    .unwrap();

    assert!(question.options.is_empty());
    assert!(question.uses_legacy_choice_keys());
    assert_eq!(
        question.payload(),
        QuestionPayload::MultipleChoice {
            options: vec!["A: Ik".to_string(), "B: De fietser".to_string()],
            correct: Some("B".to_string()),
        }
    );

    let value = serde_json::to_value(&question).unwrap();
    assert!(value.get("answers").is_some());
    assert!(value.get("options").is_none(), "Legacy key is written back as is");
}

#[test]
fn test_deserialize_document_with_both_option_keys() {
    let page: SubjectsPage = serde_json::from_value(json!({
        "subjects": [{
            "id": "s1",
            "title": "Voorrang",
            "questions": [{
                "id": "q1",
                "question": "Wie heeft voorrang?",
                "type": "multiple_choice",
                "answers": ["Oud A", "Oud B"],
                "options": ["Ik", "De fietser"],
                "correct": "B"
            }]
        }],
        "pagination": {"hasMore": false}
    }))
    .unwrap();

    let question = &page.subjects[0].questions[0];
    assert!(!question.uses_legacy_choice_keys());
    assert_eq!(question.choice_options(), ["Ik".to_string(), "De fietser".to_string()]);
}

#[test]
fn test_deserialize_open_keeps_integer_answer() {
    let question: Question = serde_json::from_value(json!({
        "question": "Wat is de maximumsnelheid?",
        "type": "open",
        "answer": 50,
        "unit": "KM/U"
    }))
    .unwrap();

    assert_eq!(question.answer, OpenAnswer::parse("50"));
    let back = serde_json::to_value(&question).unwrap();
    assert_eq!(back["answer"], json!(50));
}

#[test]
fn test_image_selection_index() {
    let question: Question = serde_json::from_value(json!({
        "question": "Welk bord?",
        "type": "image_selection",
        "imageOptions": ["a.png", "b.png", "c.png"],
        "correctAnswer": 2
    }))
    .unwrap();

    assert_eq!(question.correct_answer, Some(AnswerKey::Index(2)));
    assert_eq!(question.correct_index(), Some(2));
    assert_eq!(question.correct_choice(), None);
}

#[test]
fn test_drag_and_drop_positions() {
    let question: Question = serde_json::from_value(json!({
        "question": "Sleep de auto",
        "type": "drag_and_drop",
        "correctPositions": [{"positionX": 10.5, "positionY": 20}]
    }))
    .unwrap();

    assert_eq!(
        question.correct_positions,
        vec![Position { x: 10.5, y: 20.0 }]
    );
}

#[test]
fn test_unknown_fields_survive_round_trip() {
    let raw = json!({
        "id": "q9",
        "question": "Mag dit?",
        "type": "open",
        "answer": "nee",
        "createdAt": {"_seconds": 1700000000, "_nanoseconds": 0},
        "difficulty": 3
    });

    let question: Question = serde_json::from_value(raw.clone()).unwrap();
    assert!(question.extra.contains_key("createdAt"));

    let back = serde_json::to_value(&question).unwrap();
    assert_eq!(back["difficulty"], json!(3));
    assert_eq!(back["createdAt"], raw["createdAt"]);
}

#[test]
fn test_missing_type_defaults_to_multiple_choice() {
    let question: Question = serde_json::from_value(json!({"question": "?"})).unwrap();
    assert_eq!(question.kind, QuestionType::MultipleChoice);
}

#[test]
fn test_clear_payload() {
    let mut question = Question::new(QuestionType::Open, "Hoe hard?");
    question.answer = OpenAnswer::parse("80");
    question.unit = Some("KM/U".to_string());
    question.explanation = Some("Buiten de bebouwde kom".to_string());

    question.clear_payload();

    assert_eq!(question.answer, None);
    assert_eq!(question.unit, None);
    assert!(question.explanation.is_some(), "Shared fields are kept");
}
