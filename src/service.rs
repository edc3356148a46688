//! Submission orchestration and the submission-flow state machine.
//!
//! `SchoolService` runs one submission attempt end to end: validate, upload
//! the optional image, persist. `SubmissionFlow` wraps it in the explicit
//! `Idle -> Submitting -> {Success, Failed} -> Idle` state machine the view
//! layer owns; there is no process-wide state.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{DirectoryError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{NewSchool, SchoolSummary};
use crate::repository::SchoolRepository;
use crate::search::filter_schools;
use crate::upload::ImageStore;
use crate::validation::{SchoolValidator, ValidationErrors};

/// An image file selected for upload alongside a submission
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// MIME type reported for the file
    pub content_type: String,
    /// Raw file bytes
    pub bytes: Vec<u8>,
}

/// Orchestrates validation, image upload, and persistence
pub struct SchoolService {
    repository: Arc<dyn SchoolRepository>,
    images: Arc<ImageStore>,
    metrics: MetricsCollector,
}

impl SchoolService {
    /// Build a service over a repository and image store.
    #[must_use]
    pub fn new(repository: Arc<dyn SchoolRepository>, images: Arc<ImageStore>) -> Self {
        Self {
            repository,
            images,
            metrics: MetricsCollector::default(),
        }
    }

    /// Run one submission attempt and return the new record id.
    ///
    /// Validation runs first and aborts before any upload or persistence
    /// work. The image, when present, is uploaded next and its resulting
    /// reference attached to the record before the single `create` call.
    /// Either the full record is created or nothing is; no retries.
    pub async fn submit(&self, form: NewSchool, image: Option<ImageUpload>) -> Result<i64> {
        let errors = SchoolValidator::validate(&form);
        if !errors.is_empty() {
            self.metrics.record_validation_failure(errors.len());
            warn!(fields = ?errors.keys().collect::<Vec<_>>(), "submission rejected by validator");
            return Err(DirectoryError::Validation(errors));
        }

        let mut record = form;
        if let Some(upload) = image {
            let path = self.images.store(&upload.content_type, &upload.bytes)?;
            self.metrics.record_upload(upload.bytes.len());
            record.image = Some(path);
        }

        let id = self.repository.create(record).await?;
        self.metrics.record_submission(true);
        info!(id, "school registered");
        Ok(id)
    }

    /// Fetch the listing projection, optionally filtered by a search string.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<SchoolSummary>> {
        let schools = self.repository.list().await?;
        Ok(match search {
            Some(query) => filter_schools(&schools, query),
            None => schools,
        })
    }

    /// The image store backing this service.
    #[must_use]
    pub fn images(&self) -> &ImageStore {
        &self.images
    }
}

/// Why a submission ended in the failed state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionFailure {
    /// Field errors to surface next to the inputs
    Validation(ValidationErrors),
    /// The image step failed; the user retries or skips the image
    Upload(String),
    /// The store was unreachable or rejected the write; generic notice
    Persistence(String),
}

/// States of one submission flow
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// Ready to accept a submission
    #[default]
    Idle,
    /// A submission is in flight; repeat submissions are refused
    Submitting,
    /// The record was created
    Success {
        /// Generated id of the new record
        id: i64,
    },
    /// The submission failed
    Failed(SubmissionFailure),
}

/// The submission flow owned by the view layer
pub struct SubmissionFlow {
    service: SchoolService,
    state: SubmissionState,
}

impl SubmissionFlow {
    /// Start a flow in the idle state.
    #[must_use]
    pub fn new(service: SchoolService) -> Self {
        Self {
            service,
            state: SubmissionState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Submit a form, driving the state machine one full transition.
    ///
    /// Refused (state unchanged) while a submission is already in flight.
    /// Terminal states are `Success` and `Failed`; both return to `Idle`
    /// through [`reset`](Self::reset).
    pub async fn submit(
        &mut self,
        form: NewSchool,
        image: Option<ImageUpload>,
    ) -> &SubmissionState {
        if self.state == SubmissionState::Submitting {
            warn!("submission refused: another submission is in flight");
            return &self.state;
        }
        self.state = SubmissionState::Submitting;

        self.state = match self.service.submit(form, image).await {
            Ok(id) => SubmissionState::Success { id },
            Err(DirectoryError::Validation(errors)) => {
                SubmissionState::Failed(SubmissionFailure::Validation(errors))
            }
            Err(DirectoryError::Upload(message)) => {
                SubmissionState::Failed(SubmissionFailure::Upload(message))
            }
            Err(err) => {
                warn!(error = %err, "submission failed at the persistence step");
                SubmissionState::Failed(SubmissionFailure::Persistence(
                    "Failed to add school. Please try again.".to_string(),
                ))
            }
        };

        &self.state
    }

    /// Return to `Idle` after a terminal state (the UI's post-success delay
    /// and error dismissal both land here).
    pub fn reset(&mut self) {
        self.state = SubmissionState::Idle;
    }
}
