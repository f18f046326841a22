//! Integration tests for the API client using mockito

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use mockito::Matcher;
use serde_json::json;
use std::time::Duration;
use theorio_admin::api::{ApiClient, ApiError, Endpoint};
use theorio_admin::core::{FeedbackStatus, OpenAnswer, Question, QuestionParent, QuestionType};

const KEY: &str = "secret-key";

fn client_for(server: &mockito::ServerGuard) -> ApiClient {
    ApiClient::new(&server.url(), KEY, Duration::from_secs(5)).expect("client should build")
}

fn open_question(text: &str) -> Question {
    let mut question = Question::new(QuestionType::Open, text);
    question.answer = OpenAnswer::parse("50");
    question.unit = Some("km/u".to_string());
    question
}

// === Request helper ===

#[tokio::test]
async fn test_get_json_returns_parsed_body() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/http-getAllExams")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"exams": [{"id": "1"}]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let value = client
        .get_json(Endpoint::GetAllExams, &[] as &[(&str, &str)])
        .await
        .expect("GET should succeed");

    assert_eq!(value["exams"][0]["id"], "1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_api_key_header_sent() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/http-getAllExams")
        .match_query(Matcher::Any)
        .match_header("x-api-key", KEY)
        .with_status(200)
        .with_body(r#"{"exams": []}"#)
        .create_async()
        .await;

    let exams = client_for(&server).get_all_exams().await.unwrap();

    assert!(exams.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_json_success_is_decode_error() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/http-getAllExams")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>proxy page</html>")
        .create_async()
        .await;

    let result = client_for(&server).get_all_exams().await;
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

// === Error mapping ===

#[tokio::test]
async fn test_unauthorized_maps_message() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/http-getAllExams")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"error": "Unauthorized", "message": "Invalid or inactive API key"}"#)
        .create_async()
        .await;

    let result = client_for(&server).get_all_exams().await;
    assert_eq!(
        result,
        Err(ApiError::Unauthorized("Invalid or inactive API key".to_string()))
    );
}

#[tokio::test]
async fn test_rate_limit_carries_retry_after() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/http-getAllExams")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body(r#"{"error": "Too Many Requests", "message": "Slow down", "retryAfter": 42}"#)
        .create_async()
        .await;

    let result = client_for(&server).get_all_exams().await;
    assert_eq!(
        result,
        Err(ApiError::RateLimited {
            retry_after: Some(42)
        })
    );
}

#[tokio::test]
async fn test_server_error_keeps_raw_body() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/http-getAllExams")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let result = client_for(&server).get_all_exams().await;
    if let Err(ApiError::Status { status, message }) = result {
        assert_eq!(status, 500);
        assert_eq!(message, "Internal Server Error");
    } else {
        panic!("Expected ApiError::Status, got {:?}", result);
    }
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    // Nothing listens on the discard port
    let client = ApiClient::new("http://127.0.0.1:9", KEY, Duration::from_secs(2)).unwrap();

    let result = client.get_all_exams().await;
    assert!(
        matches!(result, Err(ApiError::Connection(_)) | Err(ApiError::Timeout)),
        "got {:?}",
        result
    );
}

// === Pagination ===

#[tokio::test]
async fn test_subjects_follow_page_tokens() {
    let mut server = mockito::Server::new_async().await;

    let first = server
        .mock("GET", "/http-getAllSubjects")
        .match_query(Matcher::Regex("^pageSize=2$".into()))
        .with_status(200)
        .with_body(
            json!({
                "subjects": [{"id": "a", "title": "A"}, {"id": "b", "title": "B"}],
                "pagination": {"nextPageToken": "b", "pageSize": 2, "hasMore": true}
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let second = server
        .mock("GET", "/http-getAllSubjects")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("pageSize".into(), "2".into()),
            Matcher::UrlEncoded("pageToken".into(), "b".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "subjects": [{"id": "c", "title": "C"}],
                "pagination": {"nextPageToken": "c", "pageSize": 2, "hasMore": false}
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let subjects = client_for(&server)
        .with_page_size(2)
        .get_all_subjects()
        .await
        .unwrap();

    let titles: Vec<_> = subjects.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_feedback_status_filter_in_query() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/http-getAllFeedback")
        .match_query(Matcher::UrlEncoded("status".into(), "in_progress".into()))
        .with_status(200)
        .with_body(
            r#"{"feedback": [{"id": "f1", "subject": "s", "feedback": "b", "status": "in_progress"}],
                "pagination": {"hasMore": false}}"#,
        )
        .create_async()
        .await;

    let items = client_for(&server)
        .get_all_feedback(Some(&FeedbackStatus::InProgress))
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].status, FeedbackStatus::InProgress);
    mock.assert_async().await;
}

// === Mutations ===

#[tokio::test]
async fn test_create_sends_parent_and_returns_id() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/http-createQuestion")
        .match_body(Matcher::PartialJson(json!({
            "question": "Hoe hard?",
            "type": "open",
            "parent": "Examen 2: Kennis"
        })))
        .with_status(201)
        .with_body(r#"{"status": "success", "message": "Question created", "questionId": "new1"}"#)
        .create_async()
        .await;

    let parent: QuestionParent = "Examen 2: Kennis".parse().unwrap();
    let response = client_for(&server)
        .create_question(&open_question("Hoe hard?"), &parent)
        .await
        .unwrap();

    assert_eq!(response.question_id.as_deref(), Some("new1"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_create_never_sent() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/http-createQuestion")
        .expect(0)
        .create_async()
        .await;

    let question = Question::new(QuestionType::Open, "Zonder antwoord");
    let result = client_for(&server)
        .create_question(&question, &QuestionParent::Subject("Voorrang".to_string()))
        .await;

    assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_passes_id_in_query() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("DELETE", "/http-deleteQuestion")
        .match_query(Matcher::UrlEncoded("id".into(), "q9".into()))
        .with_status(200)
        .with_body(r#"{"status": "success", "message": "Question deleted"}"#)
        .create_async()
        .await;

    let response = client_for(&server).delete_question("q9").await.unwrap();

    assert_eq!(response.message, "Question deleted");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_question_on_update_is_not_found() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("PUT", "/http-updateQuestion")
        .with_status(404)
        .with_body(r#"{"error": "Not Found", "message": "Question not found"}"#)
        .create_async()
        .await;

    let mut question = open_question("Bestaat niet");
    question.id = Some("gone".to_string());

    let result = client_for(&server).update_question(&question).await;
    assert_eq!(result, Err(ApiError::NotFound("Question not found".to_string())));
}

#[tokio::test]
async fn test_update_strips_server_fields() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("PUT", "/http-updateQuestion")
        .match_body(Matcher::Json(json!({
            "id": "q1",
            "question": "Hoe hard?",
            "type": "open",
            "answer": 50,
            "unit": "km/u",
            "difficulty": 2
        })))
        .with_status(200)
        .with_body(r#"{"status": "success", "message": "Question updated"}"#)
        .create_async()
        .await;

    let question: Question = serde_json::from_value(json!({
        "id": "q1",
        "question": "Hoe hard?",
        "type": "open",
        "answer": 50,
        "unit": "km/u",
        "parent": "Voorrang",
        "difficulty": 2,
        "createdAt": {"_seconds": 1700000000, "_nanoseconds": 0},
        "updatedAt": {"_seconds": 1700000500, "_nanoseconds": 0}
    }))
    .unwrap();

    let response = client_for(&server).update_question(&question).await.unwrap();

    assert_eq!(response.message, "Question updated");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_without_id_never_sent() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("PUT", "/http-updateQuestion")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut question = open_question("Zonder id");
    let result = client.update_question(&question).await;
    assert!(matches!(result, Err(ApiError::InvalidRequest(_))));

    question.id = Some("   ".to_string());
    let result = client.update_question(&question).await;
    assert!(matches!(result, Err(ApiError::InvalidRequest(_))));

    mock.assert_async().await;
}
