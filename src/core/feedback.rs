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

//! Student feedback and moderation status

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::core::catalog::Pagination;

/// Moderation status of a feedback item
///
/// The remote API stores the status as a free string. Unknown values are
/// kept in `Other` so they survive a round trip unchanged.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "String", into = "String")]
pub enum FeedbackStatus {
    /// Newly submitted, not looked at yet
    #[default]
    Open,
    /// Being handled by an editor
    InProgress,
    /// Handled (question fixed or answered)
    Resolved,
    /// Dismissed as invalid
    Rejected,
    /// Any status this client does not know
    Other(String),
}

impl FeedbackStatus {
    /// The moderation states an editor can pick
    pub const KNOWN: [FeedbackStatus; 4] = [
        FeedbackStatus::Open,
        FeedbackStatus::InProgress,
        FeedbackStatus::Resolved,
        FeedbackStatus::Rejected,
    ];

    /// Wire value
    pub fn as_str(&self) -> &str {
        match self {
            FeedbackStatus::Open => "open",
            FeedbackStatus::InProgress => "in_progress",
            FeedbackStatus::Resolved => "resolved",
            FeedbackStatus::Rejected => "rejected",
            FeedbackStatus::Other(value) => value,
        }
    }

    /// Human readable label
    pub fn label(&self) -> &str {
        match self {
            FeedbackStatus::Open => "Open",
            FeedbackStatus::InProgress => "In progress",
            FeedbackStatus::Resolved => "Resolved",
            FeedbackStatus::Rejected => "Rejected",
            FeedbackStatus::Other(value) => value,
        }
    }
}

impl From<&str> for FeedbackStatus {
    fn from(value: &str) -> Self {
        match value.trim() {
            "open" => FeedbackStatus::Open,
            "in_progress" => FeedbackStatus::InProgress,
            "resolved" => FeedbackStatus::Resolved,
            "rejected" => FeedbackStatus::Rejected,
            other => FeedbackStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for FeedbackStatus {
    fn from(value: String) -> Self {
        FeedbackStatus::from(value.as_str())
    }
}

impl From<FeedbackStatus> for String {
    fn from(status: FeedbackStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialised Firestore timestamp (`{"_seconds": .., "_nanoseconds": ..}`)
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FirestoreTimestamp {
    #[serde(rename = "_seconds")]
    pub seconds: i64,
    #[serde(rename = "_nanoseconds", default)]
    pub nanoseconds: u32,
}

/// A feedback item submitted by a student
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Document id
    pub id: String,
    /// Short subject line
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    /// Feedback text
    #[serde(rename = "feedback", default, deserialize_with = "null_as_default")]
    pub body: String,
    /// Submission time
    #[serde(default)]
    pub date: Option<FirestoreTimestamp>,
    /// Moderation status
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: FeedbackStatus,
    /// Question the feedback is about
    #[serde(default)]
    pub question_id: Option<String>,
    /// Submitting user
    #[serde(default)]
    pub user_id: Option<String>,
}

/// One page of `getAllFeedback`
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FeedbackPage {
    #[serde(default)]
    pub feedback: Vec<Feedback>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Returns the items with the given status (all items for `None`)
pub fn filter_feedback(items: &[Feedback], status: Option<&FeedbackStatus>) -> Vec<Feedback> {
    items
        .iter()
        .filter(|item| status.is_none_or(|status| &item.status == status))
        .cloned()
        .collect()
}

/// Treats an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_unknown_values() {
        let status: FeedbackStatus = serde_json::from_str("\"escalated\"").unwrap();
        assert_eq!(status, FeedbackStatus::Other("escalated".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"escalated\"");
    }

    #[test]
    fn test_feedback_tolerates_nulls() {
        let item: Feedback = serde_json::from_str(
            r#"{"id": "f1", "subject": null, "feedback": "Typo", "status": null, "questionId": null}"#,
        )
        .unwrap();

        assert_eq!(item.subject, "");
        assert_eq!(item.body, "Typo");
        assert_eq!(item.status, FeedbackStatus::Open);
        assert_eq!(item.question_id, None);
    }

    #[test]
    fn test_filter_feedback_by_status() {
        let items = vec![
            Feedback {
                id: "a".to_string(),
                status: FeedbackStatus::Open,
                ..Default::default()
            },
            Feedback {
                id: "b".to_string(),
                status: FeedbackStatus::Resolved,
                ..Default::default()
            },
        ];

        assert_eq!(filter_feedback(&items, None).len(), 2);
        let resolved = filter_feedback(&items, Some(&FeedbackStatus::Resolved));
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "b");
    }
}
