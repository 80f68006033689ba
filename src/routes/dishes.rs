use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::{Form, Json};
use serde_json::{Map, Value};

use crate::app_state::AppState;
use crate::models::form::FormField;
use crate::models::submission::{FailureCause, SubmitDishResponse};
use crate::services::form_session::{FormSession, FormStatus};
use crate::services::pages;

/// GET / — Render an empty dish form.
pub async fn show_form(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    render(&state, &FormSession::default()).map(Html)
}

/// POST / — Validate the posted form, forward it to the dishes API and
/// render the settled form.
pub async fn submit_form(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<(StatusCode, Html<String>), StatusCode> {
    let mut session = FormSession::default();
    for (name, value) in fields {
        apply_field(&mut session, &name, value);
    }

    session.submit(&state.dishes).await;

    let html = render(&state, &session)?;
    Ok((status_code(&session), Html(html)))
}

/// POST /api/v1/dishes — JSON flavour of the form for non-HTML clients.
///
/// Keys use the form's camelCase names; values may be strings or numbers.
pub async fn submit_dish(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> (StatusCode, Json<SubmitDishResponse>) {
    let mut session = FormSession::default();
    for (name, value) in body {
        let value = match value {
            Value::Null => String::new(),
            Value::String(s) => s,
            other => other.to_string(),
        };
        apply_field(&mut session, &name, value);
    }

    let status = session.submit(&state.dishes).await;

    let label = match status {
        FormStatus::Succeeded => "success",
        FormStatus::Failed(FailureCause::Rejected { .. }) => "rejected",
        FormStatus::Failed(FailureCause::Unreachable) => "unreachable",
        FormStatus::Idle | FormStatus::Submitting => "invalid",
    };

    let response = SubmitDishResponse {
        status: label,
        message: session.banner().map(|banner| banner.message),
        errors: session.errors().clone(),
    };

    (status_code(&session), Json(response))
}

fn apply_field(session: &mut FormSession, name: &str, value: String) {
    match name.parse::<FormField>() {
        Ok(field) => session.edit(field, value),
        Err(_) => tracing::debug!(field = %name, "Ignoring unknown form field"),
    }
}

fn status_code(session: &FormSession) -> StatusCode {
    match session.status() {
        FormStatus::Succeeded => StatusCode::OK,
        FormStatus::Failed(FailureCause::Rejected { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        FormStatus::Failed(FailureCause::Unreachable) => StatusCode::BAD_GATEWAY,
        FormStatus::Idle if !session.errors().is_empty() => StatusCode::UNPROCESSABLE_ENTITY,
        FormStatus::Idle | FormStatus::Submitting => StatusCode::OK,
    }
}

fn render(state: &AppState, session: &FormSession) -> Result<String, StatusCode> {
    pages::render_dish_form(&state.templates, session).map_err(|e| {
        tracing::error!(error = %e, "Failed to render dish form");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
