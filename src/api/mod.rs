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

//! Remote API access
//!
//! - `endpoints`: The backend function table (path + method)
//! - `client`: Typed async HTTP client with the `x-api-key` header
//! - `error`: Status and transport error mapping
//! - `worker`: Background thread that runs requests off the UI thread

pub mod client;
pub mod endpoints;
pub mod error;
pub mod worker;

pub use client::{ApiClient, MutationResponse, API_KEY_HEADER};
pub use endpoints::Endpoint;
pub use error::ApiError;
pub use worker::{Completion, Request, RequestId, RequestKind, Response, Worker, WorkerHandle};
