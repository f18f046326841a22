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

//! MVC Controller - Mediates between the model (catalog, feedback) and the GTK4 views
//!
//! # Responsibilities
//!
//! - Hold the catalog tree and the feedback list
//! - Hold the search query and the feedback status filter
//! - Validate edits locally before anything is sent
//! - Queue requests on the background worker and apply their results
//!
//! # Architecture
//!
//! The Controller owns the [`WorkerHandle`] but knows nothing about GTK4
//! widgets. Views call the mutating methods, then a periodic timer calls
//! [`Controller::poll`] and redraws whatever the returned events touch.
//! All of this runs on one thread, hence `RefCell` rather than locks.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{
    ApiClient, ApiError, Completion, Request, RequestId, RequestKind, Response, Worker,
    WorkerHandle,
};
use crate::config::{export_snapshot, SettingsError};
use crate::core::{
    filter_feedback, validate_new_question, validate_question, Catalog, CatalogNode, Feedback,
    FeedbackStatus, Question, QuestionParent, ValidationError,
};

/// Reasons an action is refused before it reaches the worker
#[derive(Debug, Error, PartialEq)]
pub enum ControllerError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Question has no ID and cannot be updated")]
    MissingQuestionId,

    #[error("ID cannot be empty")]
    EmptyId,
}

/// Something the views need to react to
#[derive(Clone, Debug, PartialEq)]
pub enum ControllerEvent {
    /// Subjects or exams were (re)loaded
    CatalogChanged,
    /// The feedback list was (re)loaded
    FeedbackChanged,
    QuestionCreated {
        id: Option<String>,
        parent: QuestionParent,
    },
    QuestionUpdated(String),
    QuestionDeleted(String),
    FeedbackStatusChanged {
        id: String,
        status: FeedbackStatus,
    },
    /// A request failed; shown as a modal dialog
    Failed { action: RequestKind, error: ApiError },
}

/// MVC Controller coordinating model, worker and views
pub struct Controller {
    /// Background request queue
    worker: WorkerHandle,
    /// Subjects and exams as last loaded, patched after each edit
    catalog: RefCell<Catalog>,
    /// All feedback items as last loaded
    feedback: RefCell<Vec<Feedback>>,
    /// Current search text on the Questions page
    query: RefCell<String>,
    /// Status filter on the Feedback page (`None` = all)
    feedback_filter: RefCell<Option<FeedbackStatus>>,
    /// Requests submitted but not yet completed
    in_flight: RefCell<HashMap<RequestId, RequestKind>>,
}

impl Controller {
    /// Creates a controller with its own background worker
    ///
    /// # Arguments
    ///
    /// * `client` - API client the worker will use
    ///
    /// # Returns
    ///
    /// * `Ok(Controller)` - Worker thread running, no data loaded yet
    /// * `Err(io::Error)` - Worker thread could not be started
    ///
    /// # Example
    ///
    /// ```no_run
    /// use theorio_admin::api::ApiClient;
    /// use theorio_admin::ui::Controller;
    /// use std::time::Duration;
    ///
    /// let client = ApiClient::new("http://127.0.0.1:5001", "key", Duration::from_secs(30))?;
    /// let controller = Controller::new(client)?;
    /// controller.refresh();
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(client: ApiClient) -> io::Result<Self> {
        Ok(Self::with_worker(Worker::spawn(client)?))
    }

    /// Creates a controller around an existing worker
    pub fn with_worker(worker: WorkerHandle) -> Self {
        Self {
            worker,
            catalog: RefCell::new(Catalog::default()),
            feedback: RefCell::new(Vec::new()),
            query: RefCell::new(String::new()),
            feedback_filter: RefCell::new(None),
            in_flight: RefCell::new(HashMap::new()),
        }
    }

    fn submit(&self, request: Request) -> RequestId {
        let kind = request.kind();
        let id = self.worker.submit(request);
        self.in_flight.borrow_mut().insert(id, kind);
        id
    }

    // === Loading ===

    /// Reloads subjects, exams and feedback
    pub fn refresh(&self) {
        info!("Refreshing catalog and feedback");
        self.submit(Request::LoadSubjects);
        self.submit(Request::LoadExams);
        self.refresh_feedback();
    }

    /// Reloads feedback only
    pub fn refresh_feedback(&self) {
        self.submit(Request::LoadFeedback { status: None });
    }

    // === Edits ===

    /// Validates and queues a new question under `parent`
    pub fn create_question(
        &self,
        question: Question,
        parent: QuestionParent,
    ) -> Result<RequestId, ControllerError> {
        validate_new_question(&question, &parent)?;
        Ok(self.submit(Request::CreateQuestion { question, parent }))
    }

    /// Validates and queues an update of an existing question
    pub fn update_question(&self, question: Question) -> Result<RequestId, ControllerError> {
        if question.id.as_deref().is_none_or(|id| id.trim().is_empty()) {
            return Err(ControllerError::MissingQuestionId);
        }
        validate_question(&question)?;
        Ok(self.submit(Request::UpdateQuestion(question)))
    }

    /// Queues deletion of a question
    pub fn delete_question(&self, id: &str) -> Result<RequestId, ControllerError> {
        let id = non_empty_id(id)?;
        Ok(self.submit(Request::DeleteQuestion(id)))
    }

    /// Queues a moderation status change
    pub fn set_feedback_status(
        &self,
        id: &str,
        status: FeedbackStatus,
    ) -> Result<RequestId, ControllerError> {
        let id = non_empty_id(id)?;
        Ok(self.submit(Request::UpdateFeedbackStatus { id, status }))
    }

    // === Completion handling ===

    /// Drains finished requests and applies them to the model
    ///
    /// Never blocks. Call from a UI timer.
    pub fn poll(&self) -> Vec<ControllerEvent> {
        let mut events = Vec::new();
        while let Some(completion) = self.worker.try_recv() {
            events.push(self.apply(completion));
        }
        events
    }

    fn apply(&self, completion: Completion) -> ControllerEvent {
        let Completion {
            id,
            request_kind,
            result,
        } = completion;
        self.in_flight.borrow_mut().remove(&id);

        let response = match result {
            Ok(response) => response,
            Err(error) => {
                warn!(id, action = request_kind.action(), error = %error, "Request failed");
                return ControllerEvent::Failed {
                    action: request_kind,
                    error,
                };
            }
        };

        match response {
            Response::Subjects(subjects) => {
                debug!(count = subjects.len(), "Subjects applied");
                self.catalog.borrow_mut().set_subjects(subjects);
                ControllerEvent::CatalogChanged
            }
            Response::Exams(exams) => {
                debug!(count = exams.len(), "Exams applied");
                self.catalog.borrow_mut().set_exams(exams);
                ControllerEvent::CatalogChanged
            }
            Response::Feedback(items) => {
                debug!(count = items.len(), "Feedback applied");
                *self.feedback.borrow_mut() = items;
                ControllerEvent::FeedbackChanged
            }
            Response::Created { question, parent } => {
                let question_id = question.id.clone();
                if !self.catalog.borrow_mut().insert_question(&parent, question) {
                    warn!(%parent, "Created question's parent is not loaded");
                }
                info!(id = ?question_id, %parent, "Question created");
                ControllerEvent::QuestionCreated {
                    id: question_id,
                    parent,
                }
            }
            Response::Updated(question) => {
                let replaced = self.catalog.borrow_mut().replace_question(&question);
                let question_id = question.id.unwrap_or_default();
                info!(id = %question_id, replaced, "Question updated");
                ControllerEvent::QuestionUpdated(question_id)
            }
            Response::Deleted(question_id) => {
                let removed = self.catalog.borrow_mut().remove_question(&question_id);
                info!(id = %question_id, removed, "Question deleted");
                ControllerEvent::QuestionDeleted(question_id)
            }
            Response::FeedbackStatusChanged { id, status } => {
                if let Some(item) = self.feedback.borrow_mut().iter_mut().find(|f| f.id == id) {
                    item.status = status.clone();
                }
                info!(%id, %status, "Feedback status changed");
                ControllerEvent::FeedbackStatusChanged { id, status }
            }
        }
    }

    // === Queries ===

    /// Catalog rows matching the current search query
    pub fn current_nodes(&self) -> Vec<CatalogNode> {
        self.catalog.borrow().filter(&self.query.borrow())
    }

    /// Feedback matching the current status filter
    pub fn current_feedback(&self) -> Vec<Feedback> {
        filter_feedback(&self.feedback.borrow(), self.feedback_filter.borrow().as_ref())
    }

    pub fn set_query(&self, query: &str) {
        *self.query.borrow_mut() = query.to_string();
    }

    pub fn query(&self) -> String {
        self.query.borrow().clone()
    }

    pub fn set_feedback_filter(&self, status: Option<FeedbackStatus>) {
        *self.feedback_filter.borrow_mut() = status;
    }

    /// Number of requests still running
    pub fn pending(&self) -> usize {
        self.in_flight.borrow().len()
    }

    /// Looks up a question and the parent it was found under
    pub fn question(&self, id: &str) -> Option<(QuestionParent, Question)> {
        self.catalog
            .borrow()
            .find_question(id)
            .map(|(parent, question)| (parent, question.clone()))
    }

    pub fn feedback_item(&self, id: &str) -> Option<Feedback> {
        self.feedback.borrow().iter().find(|f| f.id == id).cloned()
    }

    /// Every subject and exam section a question can be added to
    pub fn parents(&self) -> Vec<QuestionParent> {
        self.catalog.borrow().parents()
    }

    pub fn question_count(&self) -> usize {
        self.catalog.borrow().question_count()
    }

    /// Writes the loaded catalog and feedback to `path`
    pub fn export(&self, path: &Path) -> Result<usize, SettingsError> {
        export_snapshot(path, &self.catalog.borrow(), &self.feedback.borrow())
    }
}

fn non_empty_id(id: &str) -> Result<String, ControllerError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ControllerError::EmptyId);
    }
    Ok(id.to_string())
}
