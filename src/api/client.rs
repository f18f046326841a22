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

//! HTTP client for the course backend
//!
//! `ApiClient` wraps a `reqwest::Client` configured with the static
//! `x-api-key` header and a request timeout. The generic helpers return the
//! parsed JSON body on 2xx and an [`ApiError`] for anything else; the typed
//! operations build on them.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::endpoints::Endpoint;
use super::error::ApiError;
use crate::config::ApiSettings;
use crate::core::catalog::{ExamsResponse, SubjectsPage};
use crate::core::feedback::FeedbackPage;
use crate::core::{
    validate_new_question, Exam, Feedback, FeedbackStatus, Question, QuestionParent, Subject,
};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Server-managed fields stripped before an update
const SERVER_FIELDS: [&str; 2] = ["createdAt", "updatedAt"];

/// Query parameters as sent on the wire
type Query = Vec<(&'static str, String)>;

/// Body returned by every mutating endpoint
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_id: Option<String>,
    /// Stored question, returned by create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
}

/// Client for the course backend
#[derive(Clone, Debug)]
pub struct ApiClient {
    inner: reqwest::Client,
    base_url: String,
    page_size: u32,
}

impl ApiClient {
    /// Builds a client for `base_url` that sends `api_key` with every request
    ///
    /// # Returns
    ///
    /// * `Ok(ApiClient)` - Ready to use
    /// * `Err(ApiError::Build)` - Key is not a valid header value or TLS setup failed
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| ApiError::Build(format!("Invalid API key: {}", e)))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let inner = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Build(e.to_string()))?;

        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size: 50,
        })
    }

    /// Builds a client from loaded settings
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, ApiError> {
        Ok(Self::new(&settings.url, &settings.key, settings.timeout())?
            .with_page_size(settings.page_size))
    }

    /// Sets the page size used for paginated lists
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of an endpoint
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn request(&self, method: Method, endpoint: Endpoint) -> RequestBuilder {
        self.inner.request(method, self.url(endpoint))
    }

    async fn send<T>(&self, endpoint: Endpoint, request: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%endpoint, status = status.as_u16(), bytes = body.len(), "API response");

        if !status.is_success() {
            return Err(ApiError::from_response(status, &body));
        }

        serde_json::from_str(&body).map_err(ApiError::from)
    }

    // === Generic helpers ===

    /// GET with query parameters, returns JSON deserialized to T
    pub async fn get<T, Q>(&self, endpoint: Endpoint, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, endpoint).query(query);
        self.send(endpoint, request).await
    }

    /// GET returning the raw JSON document
    pub async fn get_json<Q>(&self, endpoint: Endpoint, query: &Q) -> Result<Value, ApiError>
    where
        Q: Serialize + ?Sized,
    {
        self.get(endpoint, query).await
    }

    /// POST with JSON body, returns JSON deserialized to T
    pub async fn post<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, endpoint).json(body);
        self.send(endpoint, request).await
    }

    /// PUT with JSON body, returns JSON deserialized to T
    pub async fn put<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, endpoint).json(body);
        self.send(endpoint, request).await
    }

    /// DELETE with query parameters, returns JSON deserialized to T
    pub async fn delete<T, Q>(&self, endpoint: Endpoint, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::DELETE, endpoint).query(query);
        self.send(endpoint, request).await
    }

    // === Typed operations ===

    /// Fetches every subject, following pagination to the end
    pub async fn get_all_subjects(&self) -> Result<Vec<Subject>, ApiError> {
        let mut subjects = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let page: SubjectsPage = self
                .get(Endpoint::GetAllSubjects, &self.page_query(token.as_deref()))
                .await?;
            subjects.extend(page.subjects);

            match next_token(&page.pagination.next_page_token, page.pagination.has_more, &token) {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        debug!(count = subjects.len(), "Subjects loaded");
        Ok(subjects)
    }

    /// Fetches every exam with its three sections
    pub async fn get_all_exams(&self) -> Result<Vec<Exam>, ApiError> {
        let response: ExamsResponse = self.get(Endpoint::GetAllExams, &Query::new()).await?;
        debug!(count = response.exams.len(), "Exams loaded");
        Ok(response.exams)
    }

    /// Fetches all feedback, optionally only items with `status`
    pub async fn get_all_feedback(
        &self,
        status: Option<&FeedbackStatus>,
    ) -> Result<Vec<Feedback>, ApiError> {
        let mut feedback = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let mut query = self.page_query(token.as_deref());
            if let Some(status) = status {
                query.push(("status", status.as_str().to_string()));
            }

            let page: FeedbackPage = self.get(Endpoint::GetAllFeedback, &query).await?;
            feedback.extend(page.feedback);

            match next_token(&page.pagination.next_page_token, page.pagination.has_more, &token) {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        debug!(count = feedback.len(), "Feedback loaded");
        Ok(feedback)
    }

    /// Creates `question` under `parent`
    ///
    /// The question is validated first; an invalid question never reaches
    /// the network.
    pub async fn create_question(
        &self,
        question: &Question,
        parent: &QuestionParent,
    ) -> Result<MutationResponse, ApiError> {
        validate_new_question(question, parent)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        let mut body = question.clone();
        body.id = None;
        body.parent = Some(parent.to_string());

        self.post(Endpoint::CreateQuestion, &body).await
    }

    /// Replaces a stored question; `question.id` is required
    pub async fn update_question(&self, question: &Question) -> Result<MutationResponse, ApiError> {
        if question.id.as_deref().is_none_or(|id| id.trim().is_empty()) {
            return Err(ApiError::InvalidRequest(
                "Question ID is required for an update".to_string(),
            ));
        }

        let mut body = question.clone();
        body.parent = None;
        for field in SERVER_FIELDS {
            body.extra.remove(field);
        }

        self.put(Endpoint::UpdateQuestion, &body).await
    }

    /// Deletes a question by id
    pub async fn delete_question(&self, id: &str) -> Result<MutationResponse, ApiError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ApiError::InvalidRequest("Question ID is required".to_string()));
        }

        self.delete(Endpoint::DeleteQuestion, &[("id", id)]).await
    }

    /// Sets the moderation status of a feedback item
    pub async fn update_feedback_status(
        &self,
        id: &str,
        status: &FeedbackStatus,
    ) -> Result<MutationResponse, ApiError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ApiError::InvalidRequest("Feedback ID is required".to_string()));
        }

        let body = json!({ "feedbackId": id, "status": status.as_str() });
        self.put(Endpoint::UpdateFeedbackStatus, &body).await
    }

    fn page_query(&self, token: Option<&str>) -> Query {
        let mut query = vec![("pageSize", self.page_size.to_string())];
        if let Some(token) = token {
            query.push(("pageToken", token.to_string()));
        }
        query
    }
}

/// Token for the next page, or `None` when pagination is done
///
/// A token equal to the previous one means the server did not advance;
/// stopping there avoids looping forever.
fn next_token(next: &Option<String>, has_more: bool, previous: &Option<String>) -> Option<String> {
    if !has_more {
        return None;
    }
    next.clone().filter(|token| !token.is_empty() && Some(token) != previous.as_ref())
}
