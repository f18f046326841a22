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

use crate::core::catalog::{Catalog, CatalogNode, Exam, ExamSection, Subject, EXAMS_GROUP, SUBJECTS_GROUP};
use crate::core::types::{ExamCategory, Question, QuestionParent, QuestionType};

fn question(id: &str, text: &str, kind: QuestionType) -> Question {
    Question {
        id: Some(id.to_string()),
        ..Question::new(kind, text)
    }
}

/// Helper: two subjects and one exam, with "shared" linked twice
fn sample_catalog() -> Catalog {
    let subjects = vec![
        Subject {
            id: "s1".to_string(),
            title: "Voorrang".to_string(),
            question_ids: vec!["q1".to_string(), "shared".to_string()],
            questions: vec![
                question("q1", "Wie gaat eerst?", QuestionType::MultipleChoice),
                question("shared", "Welk bord is dit?", QuestionType::ImageSelection),
            ],
        },
        Subject {
            id: "s2".to_string(),
            title: "Snelheid".to_string(),
            question_ids: vec!["q2".to_string()],
            questions: vec![question("q2", "Hoe hard mag je hier?", QuestionType::Open)],
        },
    ];

    let exams = vec![Exam {
        id: "1".to_string(),
        inzicht: ExamSection {
            question_ids: vec!["shared".to_string()],
            questions: vec![question("shared", "Welk bord is dit?", QuestionType::ImageSelection)],
        },
        ..Default::default()
    }];

    Catalog::new(subjects, exams)
}

#[test]
fn test_nodes_order() {
    let nodes = sample_catalog().nodes();
    let labels: Vec<String> = nodes.iter().map(|n| n.label()).collect();

    assert_eq!(
        labels,
        vec![
            SUBJECTS_GROUP.to_string(),
            "Voorrang (2)".to_string(),
            "Question 1".to_string(),
            "Question 2".to_string(),
            "Snelheid (1)".to_string(),
            "Question 1".to_string(),
            EXAMS_GROUP.to_string(),
            "Examen 1: Gevaarherkenning (0)".to_string(),
            "Examen 1: Inzicht (1)".to_string(),
            "Question 1".to_string(),
            "Examen 1: Kennis (0)".to_string(),
        ]
    );
}

#[test]
fn test_node_depths() {
    let nodes = sample_catalog().nodes();
    assert_eq!(nodes[0].depth(), 0);
    assert_eq!(nodes[1].depth(), 1);
    assert_eq!(nodes[2].depth(), 2);
    assert!(nodes[0].parent().is_none());
    assert!(nodes[2].question().is_some());
}

#[test]
fn test_question_count_counts_each_location() {
    assert_eq!(sample_catalog().question_count(), 4);
}

#[test]
fn test_parents() {
    let parents = sample_catalog().parents();
    assert_eq!(parents.len(), 5);
    assert_eq!(parents[0], QuestionParent::Subject("Voorrang".to_string()));
    assert_eq!(parents[4].to_string(), "Examen 1: Kennis");
}

#[test]
fn test_filter_keeps_matching_sections_only() {
    let nodes = sample_catalog().filter("HARD");

    assert_eq!(nodes.len(), 3);
    assert!(matches!(&nodes[0], CatalogNode::Group { title } if title == SUBJECTS_GROUP));
    assert_eq!(nodes[1].label(), "Snelheid (1)");
    assert_eq!(nodes[2].question().and_then(|q| q.id.as_deref()), Some("q2"));
}

#[test]
fn test_filter_by_type_label() {
    let nodes = sample_catalog().filter("image selection");
    let questions = nodes.iter().filter(|n| n.question().is_some()).count();
    assert_eq!(questions, 2, "Shared question appears in both locations");
}

#[test]
fn test_filter_by_term() {
    let mut subjects = sample_catalog().subjects().to_vec();
    subjects[1].questions[0].terms = vec!["Bebouwde kom".to_string()];
    let catalog = Catalog::new(subjects, Vec::new());

    let nodes = catalog.filter("bebouwde");
    let ids: Vec<_> = nodes
        .iter()
        .filter_map(|n| n.question().and_then(|q| q.id.as_deref()))
        .collect();
    assert_eq!(ids, vec!["q2"]);
}

#[test]
fn test_filter_keeps_original_index() {
    let nodes = sample_catalog().filter("bord");
    let first = nodes
        .iter()
        .find(|n| n.question().is_some())
        .unwrap();
    assert_eq!(first.label(), "Question 2");
}

#[test]
fn test_filter_empty_query_returns_everything() {
    let catalog = sample_catalog();
    assert_eq!(catalog.filter("   "), catalog.nodes());
}

#[test]
fn test_filter_no_match() {
    assert!(sample_catalog().filter("zebrapad").is_empty());
}

#[test]
fn test_find_question() {
    let catalog = sample_catalog();
    let (parent, found) = catalog.find_question("q2").unwrap();
    assert_eq!(parent, QuestionParent::Subject("Snelheid".to_string()));
    assert_eq!(found.text, "Hoe hard mag je hier?");
    assert!(catalog.find_question("missing").is_none());
}

#[test]
fn test_insert_question_into_exam_section() {
    let mut catalog = sample_catalog();
    let parent = QuestionParent::Exam {
        number: "1".to_string(),
        category: ExamCategory::Knowledge,
    };

    assert!(catalog.insert_question(&parent, question("q3", "Nieuw", QuestionType::Open)));

    let kennis = catalog.exams()[0].section(ExamCategory::Knowledge);
    assert_eq!(kennis.question_ids, vec!["q3".to_string()]);
    assert_eq!(kennis.questions.len(), 1);
}

#[test]
fn test_insert_question_unknown_parent() {
    let mut catalog = sample_catalog();
    let parent = QuestionParent::Subject("Onbekend".to_string());
    assert!(!catalog.insert_question(&parent, question("q3", "Nieuw", QuestionType::Open)));
    assert_eq!(catalog.question_count(), 4);
}

#[test]
fn test_replace_question_everywhere() {
    let mut catalog = sample_catalog();
    let updated = question("shared", "Welk verkeersbord is dit?", QuestionType::ImageSelection);

    assert_eq!(catalog.replace_question(&updated), 2);
    assert_eq!(
        catalog.exams()[0].inzicht.questions[0].text,
        "Welk verkeersbord is dit?"
    );
}

#[test]
fn test_replace_question_without_id() {
    let mut catalog = sample_catalog();
    assert_eq!(catalog.replace_question(&Question::default()), 0);
}

#[test]
fn test_remove_question_everywhere() {
    let mut catalog = sample_catalog();

    assert_eq!(catalog.remove_question("shared"), 2);
    assert_eq!(catalog.question_count(), 2);
    assert_eq!(catalog.subjects()[0].question_ids, vec!["q1".to_string()]);
    assert!(catalog.exams()[0].inzicht.question_ids.is_empty());
    assert_eq!(catalog.remove_question("shared"), 0);
}
