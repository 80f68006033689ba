//! Dishes API client
//!
//! Sends validated dishes to the remote dishes backend and turns its
//! answer into a [`SubmissionOutcome`].

use std::time::Instant;

use reqwest::Client;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::dish::DishRecord;
use crate::models::form::{FieldError, FieldErrors, FormField};
use crate::models::submission::{FailureCause, SubmissionOutcome};

/// Client for `POST <base>/dishes/`.
pub struct DishesClient {
    http: Client,
    endpoint: String,
}

impl DishesClient {
    /// Create a client for the dishes API rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ClientError::Config("dishes API URL is empty".to_string()));
        }

        let http = Client::builder()
            .user_agent(concat!("dish-form/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/dishes/", base_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit one dish. Exactly one request is sent and never retried.
    ///
    /// Transport failures are folded into [`FailureCause::Unreachable`];
    /// this never returns an error to the caller.
    pub async fn submit(&self, record: &DishRecord) -> SubmissionOutcome {
        let submission_id = Uuid::new_v4();
        let start = Instant::now();

        tracing::info!(
            submission_id = %submission_id,
            dish_type = %record.dish_type(),
            endpoint = %self.endpoint,
            "Submitting dish"
        );

        let outcome = match self.post(record).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    submission_id = %submission_id,
                    error = %e,
                    "Dishes API unreachable"
                );
                SubmissionOutcome::unreachable()
            }
        };

        metrics::counter!("dish_submissions_total", "outcome" => outcome.label()).increment(1);
        metrics::histogram!("dish_submission_seconds").record(start.elapsed().as_secs_f64());

        match &outcome {
            SubmissionOutcome::Success => {
                tracing::info!(submission_id = %submission_id, "Dish accepted");
            }
            SubmissionOutcome::Failure {
                cause,
                field_errors,
            } => {
                tracing::info!(
                    submission_id = %submission_id,
                    cause = ?cause,
                    rejected_fields = field_errors.len(),
                    "Dish not accepted"
                );
            }
        }

        outcome
    }

    async fn post(&self, record: &DishRecord) -> Result<SubmissionOutcome, SubmitError> {
        let response = self.http.post(&self.endpoint).json(record).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(SubmissionOutcome::Success);
        }

        let body = response.bytes().await?;
        let field_errors = match serde_json::from_slice::<Map<String, Value>>(&body) {
            Ok(map) => field_errors_from_body(&map),
            Err(e) => {
                tracing::debug!(status = %status, error = %e, "Error body is not a JSON object");
                FieldErrors::new()
            }
        };

        Ok(SubmissionOutcome::Failure {
            cause: FailureCause::Rejected {
                status: status.as_u16(),
            },
            field_errors,
        })
    }
}

/// Mark every field named by an error body as rejected.
///
/// Only key presence matters; keys that do not name a form field are ignored.
pub fn field_errors_from_body(body: &Map<String, Value>) -> FieldErrors {
    body.keys()
        .filter_map(|key| {
            let field = FormField::from_wire_key(key);
            if field.is_none() {
                tracing::debug!(key = %key, "Ignoring unknown key in error body");
            }
            field
        })
        .map(|field| (field, FieldError::Rejected))
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP client construction failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Dishes client configuration error: {0}")]
    Config(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("HTTP request to dishes API failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dish::{Diameter, DishDetails};
    use chrono::NaiveTime;
    use mockito::Matcher;
    use serde_json::json;

    fn pepperoni() -> DishRecord {
        DishRecord {
            name: "Pepperoni".to_string(),
            preparation_time: NaiveTime::from_hms_opt(1, 30, 0).unwrap(),
            details: DishDetails::Pizza {
                no_of_slices: 8,
                diameter: Diameter::from_hundredths(3200),
            },
        }
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = DishesClient::new("https://api.example.com/").unwrap();
        assert_eq!(client.endpoint(), "https://api.example.com/dishes/");
    }

    #[test]
    fn test_empty_base_url_is_rejected() {
        assert!(matches!(DishesClient::new("/"), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_field_errors_from_body_ignores_unknown_keys() {
        let body = json!({
            "no_of_slices": ["Ensure this value is greater than 0."],
            "diameter": "bad",
            "detail": "Validation failed"
        });

        let errors = field_errors_from_body(body.as_object().unwrap());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(&FormField::NoOfSlices), Some(&FieldError::Rejected));
        assert_eq!(errors.get(&FormField::Diameter), Some(&FieldError::Rejected));
    }

    #[tokio::test]
    async fn test_submit_success() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/dishes/")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "name": "Pepperoni",
                "preparation_time": "1:30:0",
                "type": "pizza",
                "no_of_slices": 8,
                "diameter": 32
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":1}"#)
            .expect(1)
            .create_async()
            .await;

        let client = DishesClient::new(&server.url()).unwrap();
        let outcome = client.submit(&pepperoni()).await;

        assert_eq!(outcome, SubmissionOutcome::Success);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_rejected_with_field_errors() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/dishes/")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"no_of_slices":["Ensure this value is greater than or equal to 1."]}"#)
            .expect(1)
            .create_async()
            .await;

        let client = DishesClient::new(&server.url()).unwrap();
        let outcome = client.submit(&pepperoni()).await;

        let mut expected = FieldErrors::new();
        expected.insert(FormField::NoOfSlices, FieldError::Rejected);
        assert_eq!(
            outcome,
            SubmissionOutcome::Failure {
                cause: FailureCause::Rejected { status: 400 },
                field_errors: expected,
            }
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_rejected_with_non_json_body() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/dishes/")
            .with_status(500)
            .with_header("content-type", "text/html")
            .with_body("<h1>Internal Server Error</h1>")
            .create_async()
            .await;

        let client = DishesClient::new(&server.url()).unwrap();
        let outcome = client.submit(&pepperoni()).await;

        assert_eq!(
            outcome,
            SubmissionOutcome::Failure {
                cause: FailureCause::Rejected { status: 500 },
                field_errors: FieldErrors::new(),
            }
        );
    }

    #[tokio::test]
    async fn test_submit_unreachable() {
        // Bind then release a port so nothing is listening on it.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = DishesClient::new(&format!("http://{}", addr)).unwrap();
        let outcome = client.submit(&pepperoni()).await;

        assert_eq!(outcome, SubmissionOutcome::unreachable());
    }
}
