//! Integration tests for the background worker using mockito

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use mockito::Matcher;
use std::collections::HashMap;
use std::time::Duration;
use theorio_admin::api::{ApiClient, ApiError, Request, RequestKind, Response, Worker};
use theorio_admin::core::{FeedbackStatus, Question, QuestionParent, QuestionType};

const WAIT: Duration = Duration::from_secs(5);

fn client_for(server: &mockito::ServerGuard) -> ApiClient {
    ApiClient::new(&server.url(), "worker-key", Duration::from_secs(5)).unwrap()
}

#[test]
fn test_round_trip_load_and_status_change() {
    let mut server = mockito::Server::new();

    let exams = server
        .mock("GET", "/http-getAllExams")
        .match_query(Matcher::Any)
        .match_header("x-api-key", "worker-key")
        .with_status(200)
        .with_body(r#"{"exams": [{"id": "7"}]}"#)
        .create();

    let status = server
        .mock("PUT", "/http-updateFeedbackStatus")
        .match_body(Matcher::Json(serde_json::json!({
            "feedbackId": "f1",
            "status": "resolved"
        })))
        .with_status(200)
        .with_body(r#"{"status": "success", "message": "Feedback status updated"}"#)
        .create();

    let handle = Worker::spawn(client_for(&server)).unwrap();
    let load_id = handle.submit(Request::LoadExams);
    let status_id = handle.submit(Request::UpdateFeedbackStatus {
        id: "f1".to_string(),
        status: FeedbackStatus::Resolved,
    });
    assert_ne!(load_id, status_id);

    // No ordering between requests: collect both by id
    let mut completions = HashMap::new();
    for _ in 0..2 {
        let completion = handle.recv_timeout(WAIT).expect("completion should arrive");
        completions.insert(completion.id, completion);
    }

    let load = &completions[&load_id];
    assert_eq!(load.request_kind, RequestKind::LoadExams);
    match &load.result {
        Ok(Response::Exams(exams)) => assert_eq!(exams[0].id, "7"),
        other => panic!("Expected exams, got {:?}", other),
    }

    assert_eq!(
        completions[&status_id].result,
        Ok(Response::FeedbackStatusChanged {
            id: "f1".to_string(),
            status: FeedbackStatus::Resolved,
        })
    );

    handle.shutdown();
    exams.assert();
    status.assert();
}

#[test]
fn test_failure_arrives_as_completion() {
    let mut server = mockito::Server::new();

    let _mock = server
        .mock("DELETE", "/http-deleteQuestion")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"error": "Not Found", "message": "Question not found"}"#)
        .create();

    let handle = Worker::spawn(client_for(&server)).unwrap();
    let id = handle.submit(Request::DeleteQuestion("missing".to_string()));

    let completion = handle.recv_timeout(WAIT).expect("completion should arrive");
    assert_eq!(completion.id, id);
    assert_eq!(completion.request_kind, RequestKind::DeleteQuestion);
    assert_eq!(
        completion.result,
        Err(ApiError::NotFound("Question not found".to_string()))
    );

    handle.shutdown();
}

#[test]
fn test_create_returns_question_with_server_id() {
    let mut server = mockito::Server::new();

    let _mock = server
        .mock("POST", "/http-createQuestion")
        .with_status(201)
        .with_body(r#"{"status": "success", "message": "Question created", "questionId": "abc"}"#)
        .create();

    let mut question = Question::new(QuestionType::MultipleChoice, "Wie heeft voorrang?");
    question.options = vec!["Ik".to_string(), "De tram".to_string()];
    question.correct = Some("B".to_string());
    let parent = QuestionParent::Subject("Voorrang".to_string());

    let handle = Worker::spawn(client_for(&server)).unwrap();
    handle.submit(Request::CreateQuestion {
        question,
        parent: parent.clone(),
    });

    let completion = handle.recv_timeout(WAIT).expect("completion should arrive");
    match completion.result {
        Ok(Response::Created {
            question,
            parent: created_in,
        }) => {
            assert_eq!(question.id.as_deref(), Some("abc"));
            assert_eq!(question.parent, None);
            assert_eq!(created_in, parent);
        }
        other => panic!("Expected Created, got {:?}", other),
    }

    handle.shutdown();
}

#[test]
fn test_try_recv_is_empty_before_anything_finishes() {
    let server = mockito::Server::new();
    let handle = Worker::spawn(client_for(&server)).unwrap();

    assert!(handle.try_recv().is_none());
    handle.shutdown();
}
