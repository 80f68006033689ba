use serde::Serialize;

use crate::models::dish::DishRecord;
use crate::models::form::{DishForm, FieldErrors, FormField};
use crate::models::submission::{FailureCause, SubmissionOutcome};
use crate::services::dishes_client::DishesClient;

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Succeeded,
    Failed(FailureCause),
}

/// Inputs to [`FormSession::transition`].
#[derive(Debug, Clone)]
pub enum FormEvent {
    FieldEdited(FormField, String),
    SubmitRequested,
    Settled(SubmissionOutcome),
}

/// What the caller must do after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Send(DishRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// Result banner shown once a submission has settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub severity: Severity,
    pub message: &'static str,
}

/// One user's form: field values, error markers and submit status.
#[derive(Debug, Clone)]
pub struct FormSession {
    form: DishForm,
    errors: FieldErrors,
    status: FormStatus,
}

impl Default for FormSession {
    fn default() -> Self {
        Self {
            form: DishForm::default(),
            errors: FieldErrors::new(),
            status: FormStatus::Idle,
        }
    }
}

impl FormSession {
    pub fn form(&self) -> &DishForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn is_busy(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn edit(&mut self, field: FormField, value: impl Into<String>) {
        self.transition(FormEvent::FieldEdited(field, value.into()));
    }

    /// Apply one event and return the side effect it asks for.
    pub fn transition(&mut self, event: FormEvent) -> Effect {
        match (self.status, event) {
            (FormStatus::Submitting, FormEvent::FieldEdited(field, value)) => {
                self.form.set_field(field, value);
                Effect::None
            }
            (_, FormEvent::FieldEdited(field, value)) => {
                self.form.set_field(field, value);
                self.status = FormStatus::Idle;
                Effect::None
            }
            (FormStatus::Submitting, FormEvent::SubmitRequested) => {
                tracing::debug!("Submit ignored while a submission is in flight");
                Effect::None
            }
            (_, FormEvent::SubmitRequested) => match self.form.validate() {
                Ok(record) => {
                    self.errors.clear();
                    self.status = FormStatus::Submitting;
                    Effect::Send(record)
                }
                Err(errors) => {
                    tracing::debug!(invalid_fields = errors.len(), "Form failed local validation");
                    self.errors = errors;
                    self.status = FormStatus::Idle;
                    Effect::None
                }
            },
            (FormStatus::Submitting, FormEvent::Settled(SubmissionOutcome::Success)) => {
                self.form.reset();
                self.errors.clear();
                self.status = FormStatus::Succeeded;
                Effect::None
            }
            (
                FormStatus::Submitting,
                FormEvent::Settled(SubmissionOutcome::Failure {
                    cause,
                    field_errors,
                }),
            ) => {
                self.errors = field_errors;
                self.status = FormStatus::Failed(cause);
                Effect::None
            }
            (status, FormEvent::Settled(_)) => {
                tracing::warn!(status = ?status, "Settlement received with no submission in flight");
                Effect::None
            }
        }
    }

    /// Validate, send if valid, and settle with the API's answer.
    pub async fn submit(&mut self, client: &DishesClient) -> FormStatus {
        if let Effect::Send(record) = self.transition(FormEvent::SubmitRequested) {
            let outcome = client.submit(&record).await;
            self.transition(FormEvent::Settled(outcome));
        }
        self.status
    }

    /// Banner for the current status, if one is visible.
    pub fn banner(&self) -> Option<Banner> {
        match self.status {
            FormStatus::Idle | FormStatus::Submitting => None,
            FormStatus::Succeeded => Some(Banner {
                severity: Severity::Success,
                message: "Success!",
            }),
            FormStatus::Failed(FailureCause::Rejected { .. }) => Some(Banner {
                severity: Severity::Error,
                message: "Something went wrong! Check the highlighted fields.",
            }),
            FormStatus::Failed(FailureCause::Unreachable) => Some(Banner {
                severity: Severity::Error,
                message: "Something went wrong! The dishes service could not be reached.",
            }),
        }
    }
}
