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

//! API error types

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors returned by API calls
///
/// Every variant carries owned strings so errors can cross the worker
/// channel and be shown in dialogs more than once.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    /// Missing, invalid or inactive API key
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Question or feedback item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Too many requests for this key
    #[error("Rate limit exceeded{}", retry_hint(.retry_after))]
    RateLimited {
        /// Seconds until the next request is allowed
        retry_after: Option<u64>,
    },

    /// Any other non-2xx response
    #[error("HTTP error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message from the error body, or the raw body
        message: String,
    },

    /// Server could not be reached
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timed out
    #[error("Request timeout")]
    Timeout,

    /// Response body is not the expected JSON
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Client could not be constructed
    #[error("Client build error: {0}")]
    Build(String),

    /// Rejected before sending
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// `{error, message, retryAfter}` body sent with every backend error
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    retry_after: Option<u64>,
}

impl ApiError {
    /// Maps a non-2xx status and its body to an error
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|b| b.message.clone().or_else(|| b.error.clone()))
            .unwrap_or_else(|| body.trim().to_string());

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message),
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited {
                retry_after: parsed.and_then(|b| b.retry_after),
            },
            _ => ApiError::Status {
                status: status.as_u16(),
                message,
            },
        }
    }
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    retry_after
        .map(|secs| format!(", retry after {}s", secs))
        .unwrap_or_default()
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_builder() {
            ApiError::Build(err.to_string())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ApiError::Connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
