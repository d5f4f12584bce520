use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::{error, info};

use crate::models::draft::ApplicationDraft;
use crate::services::submission_service::{
    SubmissionError, SubmissionService, SubmittedApplication,
};
use crate::utils::validation::{
    validate_draft, FormField, FormVariant, ValidationErrors, RESUME_REQUIRED,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitResult {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Invalid,
    Submitting,
    SubmittedOk,
    SubmittedError,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("application is incomplete: {0}")]
    Invalid(ValidationErrors),

    #[error("a submission is already in progress")]
    InFlight,

    #[error(transparent)]
    Failed(#[from] SubmissionError),
}

#[derive(Debug, Default)]
struct FormState {
    draft: ApplicationDraft,
    errors: ValidationErrors,
    last_result: Option<SubmitResult>,
}

/// Clears the in-flight flag however `submit` exits, including when its
/// future is dropped mid-await.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// One application form: the draft being edited, its validation messages and
/// the submission lifecycle. Only one submission may be in flight at a time.
pub struct FormController {
    submissions: SubmissionService,
    variant: FormVariant,
    state: Mutex<FormState>,
    submitting: AtomicBool,
}

impl FormController {
    pub fn new(submissions: SubmissionService, variant: FormVariant) -> Self {
        Self::with_draft(submissions, variant, ApplicationDraft::default())
    }

    pub fn with_draft(
        submissions: SubmissionService,
        variant: FormVariant,
        draft: ApplicationDraft,
    ) -> Self {
        Self {
            submissions,
            variant,
            state: Mutex::new(FormState {
                draft,
                ..Default::default()
            }),
            submitting: AtomicBool::new(false),
        }
    }

    pub fn with_selected_job(self, title: impl Into<String>) -> Self {
        self.select_job(title);
        self
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        // Plain data only, so a poisoned lock is still usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Overwrites the position with a job picked from the openings list.
    pub fn select_job(&self, title: impl Into<String>) {
        self.lock().draft.position = title.into();
    }

    /// Applies user input to the draft.
    pub fn update<F, R>(&self, edit: F) -> R
    where
        F: FnOnce(&mut ApplicationDraft) -> R,
    {
        edit(&mut self.lock().draft)
    }

    pub fn draft(&self) -> ApplicationDraft {
        self.lock().draft.clone()
    }

    pub fn errors(&self) -> ValidationErrors {
        self.lock().errors.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn last_result(&self) -> Option<SubmitResult> {
        self.lock().last_result
    }

    pub fn status(&self) -> FormStatus {
        if self.is_submitting() {
            return FormStatus::Submitting;
        }
        let state = self.lock();
        match state.last_result {
            Some(SubmitResult::Succeeded) => FormStatus::SubmittedOk,
            Some(SubmitResult::Failed) => FormStatus::SubmittedError,
            None if !state.errors.is_empty() => FormStatus::Invalid,
            None => FormStatus::Idle,
        }
    }

    /// Validates the current draft and keeps the messages for display.
    pub fn validate(&self) -> ValidationErrors {
        let mut state = self.lock();
        let errors = validate_draft(&state.draft, self.variant);
        state.errors = errors.clone();
        errors
    }

    pub async fn submit(&self) -> Result<SubmittedApplication, SubmitError> {
        if self.submitting.swap(true, Ordering::AcqRel) {
            return Err(SubmitError::InFlight);
        }
        let _guard = InFlightGuard(&self.submitting);

        let draft = {
            let mut state = self.lock();
            state.last_result = None;
            state.errors = validate_draft(&state.draft, self.variant);
            if !state.errors.is_empty() {
                return Err(SubmitError::Invalid(state.errors.clone()));
            }
            state.draft.clone()
        };

        let Some(resume) = draft.resume.as_ref() else {
            let mut errors = ValidationErrors::default();
            errors.set(FormField::Resume, RESUME_REQUIRED);
            return Err(SubmitError::Invalid(errors));
        };

        let outcome = self
            .submissions
            .submit(&draft, resume, draft.cover_letter_file.as_ref())
            .await;

        let mut state = self.lock();
        match outcome {
            Ok(submitted) => {
                info!(
                    application_id = %submitted.application.id,
                    documents = submitted.documents.len(),
                    "Application submitted"
                );
                state.draft = ApplicationDraft::default();
                state.errors = ValidationErrors::default();
                state.last_result = Some(SubmitResult::Succeeded);
                Ok(submitted)
            }
            Err(err) => {
                error!(
                    error = %err,
                    orphaned_application = ?err.orphaned_application(),
                    "Error submitting application"
                );
                state.last_result = Some(SubmitResult::Failed);
                Err(SubmitError::Failed(err))
            }
        }
    }
}
