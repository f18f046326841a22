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

//! Remote endpoint table
//!
//! Each backend function is exposed as `/http-<name>` and accepts exactly
//! one HTTP method.

use reqwest::Method;
use std::fmt;

/// Backend functions the client calls
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Endpoint {
    GetAllSubjects,
    GetAllExams,
    GetAllFeedback,
    CreateQuestion,
    UpdateQuestion,
    DeleteQuestion,
    UpdateFeedbackStatus,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::GetAllSubjects,
        Endpoint::GetAllExams,
        Endpoint::GetAllFeedback,
        Endpoint::CreateQuestion,
        Endpoint::UpdateQuestion,
        Endpoint::DeleteQuestion,
        Endpoint::UpdateFeedbackStatus,
    ];

    /// Function name as deployed
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::GetAllSubjects => "getAllSubjects",
            Endpoint::GetAllExams => "getAllExams",
            Endpoint::GetAllFeedback => "getAllFeedback",
            Endpoint::CreateQuestion => "createQuestion",
            Endpoint::UpdateQuestion => "updateQuestion",
            Endpoint::DeleteQuestion => "deleteQuestion",
            Endpoint::UpdateFeedbackStatus => "updateFeedbackStatus",
        }
    }

    /// Short key ("subjects", "createQuestion", ...)
    pub fn key(&self) -> &'static str {
        match self {
            Endpoint::GetAllSubjects => "subjects",
            Endpoint::GetAllExams => "exams",
            Endpoint::GetAllFeedback => "feedback",
            Endpoint::CreateQuestion => "createQuestion",
            Endpoint::UpdateQuestion => "updateQuestion",
            Endpoint::DeleteQuestion => "deleteQuestion",
            Endpoint::UpdateFeedbackStatus => "updateFeedbackStatus",
        }
    }

    /// URL path relative to the API base
    pub fn path(&self) -> String {
        format!("/http-{}", self.name())
    }

    /// The only method the function accepts
    pub fn method(&self) -> Method {
        match self {
            Endpoint::GetAllSubjects | Endpoint::GetAllExams | Endpoint::GetAllFeedback => {
                Method::GET
            }
            Endpoint::CreateQuestion => Method::POST,
            Endpoint::UpdateQuestion | Endpoint::UpdateFeedbackStatus => Method::PUT,
            Endpoint::DeleteQuestion => Method::DELETE,
        }
    }

    /// Resolves a short key or a function name
    ///
    /// # Example
    ///
    /// ```
    /// use theorio_admin::api::Endpoint;
    ///
    /// assert_eq!(Endpoint::from_key("subjects"), Some(Endpoint::GetAllSubjects));
    /// assert_eq!(Endpoint::from_key("getAllSubjects"), Some(Endpoint::GetAllSubjects));
    /// assert_eq!(Endpoint::from_key("http-getAllExams"), Some(Endpoint::GetAllExams));
    /// assert_eq!(Endpoint::from_key("students"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Endpoint> {
        let key = key.trim().trim_start_matches('/');
        let key = key.strip_prefix("http-").unwrap_or(key);
        Endpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.key() == key || endpoint.name() == key)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_and_methods() {
        assert_eq!(Endpoint::GetAllSubjects.path(), "/http-getAllSubjects");
        assert_eq!(Endpoint::CreateQuestion.method(), Method::POST);
        assert_eq!(Endpoint::UpdateFeedbackStatus.method(), Method::PUT);
        assert_eq!(Endpoint::DeleteQuestion.to_string(), "DELETE /http-deleteQuestion");
    }

    #[test]
    fn test_every_endpoint_resolves_from_its_keys() {
        for endpoint in Endpoint::ALL {
            assert_eq!(Endpoint::from_key(endpoint.key()), Some(endpoint));
            assert_eq!(Endpoint::from_key(endpoint.name()), Some(endpoint));
            assert_eq!(Endpoint::from_key(&endpoint.path()), Some(endpoint));
        }
    }
}
