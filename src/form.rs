// src/form.rs
//! Upload form state: selected file, job description and view state

use std::sync::Arc;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::ParseService;
use crate::error::ServiceError;
use crate::types::{ParseResult, SelectedFile, Submission};

/// What the results panel is currently showing
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading { request_id: Uuid },
    Failed(String),
    Parsed(ParseResult),
}

#[derive(Debug)]
pub enum ParseOutcome {
    Parsed(ParseResult),
    Failed(ServiceError),
    Cancelled,
}

/// A finished request, tagged with the id it was submitted under
#[derive(Debug)]
pub struct Completion {
    pub request_id: Uuid,
    pub outcome: ParseOutcome,
}

/// Handle to the single in-flight parse request
pub struct ParseTask {
    request_id: Uuid,
    handle: JoinHandle<Result<ParseResult, ServiceError>>,
}

impl ParseTask {
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Abandon the request; it completes as `ParseOutcome::Cancelled`
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.handle.abort_handle()
    }

    /// Wait for the request to finish
    pub async fn outcome(self) -> Completion {
        let outcome = match self.handle.await {
            Ok(Ok(result)) => ParseOutcome::Parsed(result),
            Ok(Err(e)) => ParseOutcome::Failed(e),
            Err(e) if e.is_cancelled() => ParseOutcome::Cancelled,
            Err(e) => ParseOutcome::Failed(ServiceError::Transport(Box::new(e))),
        };

        Completion {
            request_id: self.request_id,
            outcome,
        }
    }
}

#[derive(Debug)]
pub struct UploadForm {
    file: Option<SelectedFile>,
    job_description: String,
    view: ViewState,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadForm {
    pub fn new() -> Self {
        Self {
            file: None,
            job_description: String::new(),
            view: ViewState::Idle,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, ViewState::Loading { .. })
    }

    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.is_loading()
    }

    /// Replace the held file and drop any stale result or error.
    ///
    /// An in-flight request keeps running and its outcome still lands.
    pub fn select_file(&mut self, file: SelectedFile) {
        info!("Selected file: {} ({} bytes)", file.name, file.size());
        self.file = Some(file);
        if !self.is_loading() {
            self.view = ViewState::Idle;
        }
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    /// Send the current file and description to the service.
    ///
    /// Returns `None` without touching state when no file is selected or a
    /// request is already in flight.
    pub fn submit(&mut self, service: Arc<dyn ParseService>) -> Option<ParseTask> {
        if !self.can_submit() {
            debug!("Submit ignored: no file selected or request in flight");
            return None;
        }
        let file = self.file.clone()?;

        let request_id = Uuid::new_v4();
        let submission = Submission {
            file,
            job_description: self.job_description.clone(),
        };

        info!(%request_id, file = %submission.file.name, "Submitting resume");
        self.view = ViewState::Loading { request_id };

        let handle = tokio::spawn(async move { service.parse(submission).await });
        Some(ParseTask { request_id, handle })
    }

    /// Apply a finished request. Completions for other requests are ignored.
    pub fn complete(&mut self, completion: Completion) {
        let in_flight = match self.view {
            ViewState::Loading { request_id } => request_id,
            _ => {
                warn!(request_id = %completion.request_id, "Completion with no request in flight");
                return;
            }
        };
        if in_flight != completion.request_id {
            warn!(request_id = %completion.request_id, "Ignoring completion of a stale request");
            return;
        }

        self.view = match completion.outcome {
            ParseOutcome::Parsed(result) => {
                info!(request_id = %in_flight, scored = result.has_ats_score(), "Resume parsed");
                ViewState::Parsed(result)
            }
            ParseOutcome::Failed(e) => {
                warn!(request_id = %in_flight, "Resume parsing failed: {}", e);
                ViewState::Failed(e.user_message())
            }
            ParseOutcome::Cancelled => {
                info!(request_id = %in_flight, "Request cancelled");
                ViewState::Idle
            }
        };
    }

    /// Submit and wait for the outcome. Returns false when submit was disabled.
    pub async fn submit_and_wait(&mut self, service: Arc<dyn ParseService>) -> bool {
        match self.submit(service) {
            Some(task) => {
                let completion = task.outcome().await;
                self.complete(completion);
                true
            }
            None => false,
        }
    }
}
