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

//! Background request worker
//!
//! The GUI thread must never wait on the network. `Worker::spawn` starts a
//! dedicated thread that owns a single-threaded tokio runtime; requests are
//! queued with [`WorkerHandle::submit`] and their results come back through
//! a std channel that the UI drains without blocking.
//!
//! ```text
//! UI thread ── submit(Request) ──► [tokio mpsc] ──► theorio-worker
//!     ▲                                                 │ one task per job
//!     └──── try_recv() ◄── [std mpsc] ◄── Completion ───┘
//! ```
//!
//! Jobs run concurrently and complete in any order. Dropping the handle
//! closes the job queue; the thread finishes what is in flight and exits.

use std::cell::Cell;
use std::fmt;
use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::client::{ApiClient, MutationResponse};
use super::error::ApiError;
use crate::core::{Exam, Feedback, FeedbackStatus, Question, QuestionParent, Subject};

/// Name of the worker thread
pub const WORKER_THREAD_NAME: &str = "theorio-worker";

/// Identifies a submitted request
pub type RequestId = u64;

/// Work the background thread can do
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    LoadSubjects,
    LoadExams,
    LoadFeedback {
        status: Option<FeedbackStatus>,
    },
    CreateQuestion {
        question: Question,
        parent: QuestionParent,
    },
    UpdateQuestion(Question),
    DeleteQuestion(String),
    UpdateFeedbackStatus {
        id: String,
        status: FeedbackStatus,
    },
}

/// Payload-free tag of a [`Request`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RequestKind {
    LoadSubjects,
    LoadExams,
    LoadFeedback,
    CreateQuestion,
    UpdateQuestion,
    DeleteQuestion,
    UpdateFeedbackStatus,
}

impl RequestKind {
    /// What the user was doing, for error dialogs
    pub fn action(&self) -> &'static str {
        match self {
            RequestKind::LoadSubjects => "Loading subjects",
            RequestKind::LoadExams => "Loading exams",
            RequestKind::LoadFeedback => "Loading feedback",
            RequestKind::CreateQuestion => "Creating question",
            RequestKind::UpdateQuestion => "Updating question",
            RequestKind::DeleteQuestion => "Deleting question",
            RequestKind::UpdateFeedbackStatus => "Updating feedback status",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action())
    }
}

impl Request {
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::LoadSubjects => RequestKind::LoadSubjects,
            Request::LoadExams => RequestKind::LoadExams,
            Request::LoadFeedback { .. } => RequestKind::LoadFeedback,
            Request::CreateQuestion { .. } => RequestKind::CreateQuestion,
            Request::UpdateQuestion(_) => RequestKind::UpdateQuestion,
            Request::DeleteQuestion(_) => RequestKind::DeleteQuestion,
            Request::UpdateFeedbackStatus { .. } => RequestKind::UpdateFeedbackStatus,
        }
    }
}

/// Successful result of a [`Request`]
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    Subjects(Vec<Subject>),
    Exams(Vec<Exam>),
    Feedback(Vec<Feedback>),
    /// Stored question (with its new id) and where it was attached
    Created {
        question: Question,
        parent: QuestionParent,
    },
    Updated(Question),
    Deleted(String),
    FeedbackStatusChanged {
        id: String,
        status: FeedbackStatus,
    },
}

/// A finished request
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    pub id: RequestId,
    pub request_kind: RequestKind,
    pub result: Result<Response, ApiError>,
}

/// Spawns the background thread
pub struct Worker;

impl Worker {
    /// Starts the worker thread and returns the handle that feeds it
    ///
    /// # Returns
    ///
    /// * `Ok(WorkerHandle)` - Thread running
    /// * `Err(io::Error)` - The OS refused to create the thread
    pub fn spawn(client: ApiClient) -> io::Result<WorkerHandle> {
        let (job_tx, job_rx) = unbounded_channel();
        let (done_tx, done_rx) = mpsc::channel();

        let thread_done_tx = done_tx.clone();
        let thread = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || run(client, job_rx, thread_done_tx))?;

        info!(thread = WORKER_THREAD_NAME, "Worker started");

        Ok(WorkerHandle {
            jobs: Some(job_tx),
            completions: done_rx,
            fallback: done_tx,
            next_id: Cell::new(1),
            thread: Some(thread),
        })
    }
}

/// Owner side of the worker
///
/// Not `Sync`: it lives on the thread that submits and polls.
pub struct WorkerHandle {
    jobs: Option<UnboundedSender<(RequestId, Request)>>,
    completions: Receiver<Completion>,
    /// Reports failures locally once the worker is gone
    fallback: Sender<Completion>,
    next_id: Cell<RequestId>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Queues a request (never blocks)
    ///
    /// If the worker thread has stopped, the request completes immediately
    /// with a connection error instead of vanishing.
    pub fn submit(&self, request: Request) -> RequestId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let kind = request.kind();
        debug!(id, kind = ?kind, "Request submitted");

        let sent = self
            .jobs
            .as_ref()
            .is_some_and(|jobs| jobs.send((id, request)).is_ok());

        if !sent {
            warn!(id, kind = ?kind, "Worker not running, request dropped");
            // Receiver is owned by self, so this cannot fail
            let _ = self.fallback.send(Completion {
                id,
                request_kind: kind,
                result: Err(ApiError::Connection("Background worker is not running".to_string())),
            });
        }

        id
    }

    /// Next finished request, if any (non-blocking)
    pub fn try_recv(&self) -> Option<Completion> {
        self.completions.try_recv().ok()
    }

    /// Waits up to `timeout` for the next finished request
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Completion> {
        match self.completions.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Closes the queue and waits for in-flight requests to finish
    pub fn shutdown(mut self) {
        self.jobs = None;
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Worker thread panicked");
            }
        }
    }
}

/// Thread body: one current-thread runtime, one task per job
fn run(
    client: ApiClient,
    mut jobs: UnboundedReceiver<(RequestId, Request)>,
    done: Sender<Completion>,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            warn!(error = %e, "Failed to start worker runtime");
            return;
        }
    };

    runtime.block_on(async move {
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                job = jobs.recv() => match job {
                    Some((id, request)) => {
                        let client = client.clone();
                        let done = done.clone();
                        in_flight.spawn(async move {
                            let request_kind = request.kind();
                            let result = execute(&client, request).await;
                            if let Err(e) = &result {
                                debug!(id, kind = ?request_kind, error = %e, "Request failed");
                            }
                            if done.send(Completion { id, request_kind, result }).is_err() {
                                debug!(id, "Completion dropped, handle is gone");
                            }
                        });
                    }
                    None => break,
                },
                Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
            }
        }

        while in_flight.join_next().await.is_some() {}
    });

    info!(thread = WORKER_THREAD_NAME, "Worker stopped");
}

/// Runs one request against the API
pub async fn execute(client: &ApiClient, request: Request) -> Result<Response, ApiError> {
    match request {
        Request::LoadSubjects => client.get_all_subjects().await.map(Response::Subjects),
        Request::LoadExams => client.get_all_exams().await.map(Response::Exams),
        Request::LoadFeedback { status } => client
            .get_all_feedback(status.as_ref())
            .await
            .map(Response::Feedback),
        Request::CreateQuestion { question, parent } => {
            let response = client.create_question(&question, &parent).await?;
            Ok(Response::Created {
                question: created_question(question, response),
                parent,
            })
        }
        Request::UpdateQuestion(question) => {
            client.update_question(&question).await?;
            Ok(Response::Updated(question))
        }
        Request::DeleteQuestion(id) => {
            client.delete_question(&id).await?;
            Ok(Response::Deleted(id))
        }
        Request::UpdateFeedbackStatus { id, status } => {
            client.update_feedback_status(&id, &status).await?;
            Ok(Response::FeedbackStatusChanged { id, status })
        }
    }
}

/// The stored question as returned by the server, falling back to what was
/// sent plus the returned id
fn created_question(sent: Question, response: MutationResponse) -> Question {
    let mut question = response.question.unwrap_or(sent);
    if question.id.is_none() {
        question.id = response.question_id;
    }
    question.parent = None;
    question
}
