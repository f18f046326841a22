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

use super::super::*;
use crate::core::{Catalog, Feedback, FeedbackStatus, Question, QuestionType, Subject};
use std::fs;
use tempfile::TempDir;

fn sample_catalog() -> Catalog {
    let subject = Subject {
        id: "s1".to_string(),
        title: "Voorrang".to_string(),
        question_ids: vec!["q1".to_string()],
        questions: vec![Question {
            id: Some("q1".to_string()),
            ..Question::new(QuestionType::Open, "Wie gaat eerst?")
        }],
    };
    Catalog::new(vec![subject], Vec::new())
}

#[test]
fn test_export_writes_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.json");
    let feedback = vec![Feedback {
        id: "f1".to_string(),
        status: FeedbackStatus::Resolved,
        ..Default::default()
    }];

    let written = export_snapshot(&path, &sample_catalog(), &feedback).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(written, content.len());

    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["questionCount"], 1);
    assert_eq!(json["catalog"]["subjects"][0]["title"], "Voorrang");
    assert_eq!(json["catalog"]["subjects"][0]["questions"][0]["question"], "Wie gaat eerst?");
    assert_eq!(json["feedback"][0]["status"], "resolved");
    assert!(json["exportedAt"].is_string());
}

#[test]
fn test_export_replaces_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.json");
    fs::write(&path, "old content").unwrap();

    export_snapshot(&path, &Catalog::default(), &[]).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(!content.contains("old content"));
    assert!(content.contains("\"questionCount\": 0"));
}

#[test]
fn test_export_to_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("no/such/dir/catalog.json");

    let result = export_snapshot(&path, &Catalog::default(), &[]);
    assert!(matches!(result, Err(SettingsError::WriteFailed(_))));
}
