use serde::Serialize;

use crate::models::form::FieldErrors;

/// Why a submission did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureCause {
    /// The dishes API answered with a non-2xx status.
    Rejected { status: u16 },
    /// No response was received at all.
    Unreachable,
}

/// Result of one call to the dishes API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    Failure {
        cause: FailureCause,
        field_errors: FieldErrors,
    },
}

impl SubmissionOutcome {
    pub fn unreachable() -> Self {
        SubmissionOutcome::Failure {
            cause: FailureCause::Unreachable,
            field_errors: FieldErrors::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubmissionOutcome::Success => "success",
            SubmissionOutcome::Failure {
                cause: FailureCause::Rejected { .. },
                ..
            } => "rejected",
            SubmissionOutcome::Failure {
                cause: FailureCause::Unreachable,
                ..
            } => "unreachable",
        }
    }
}

/// Response body of `POST /api/v1/dishes`.
#[derive(Debug, Serialize)]
pub struct SubmitDishResponse {
    pub status: &'static str,
    pub message: Option<&'static str>,
    pub errors: FieldErrors,
}
